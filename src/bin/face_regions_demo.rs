use face_regions::image::io::{
    load_rgb_image, read_json_file, save_mask_png, save_regions_png, write_json_file,
};
use face_regions::{
    classify_regions, DetectorConfig, DetectorOptions, FaceRegionDetector, FeatureExtractor,
    HogOptions, LinearClassifier, Rgb, SkinPreset,
};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct DemoConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub preset: SkinPreset,
    /// Field overrides applied on top of the preset's options.
    #[serde(default)]
    pub detector: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub hog: HogOptions,
    /// Optional linear model JSON (`{"weights": [...], "bias": ...}`).
    #[serde(default)]
    pub classifier: Option<PathBuf>,
    pub output: DemoOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct DemoOutputConfig {
    pub report_json: PathBuf,
    #[serde(default)]
    pub mask_png: Option<PathBuf>,
    #[serde(default)]
    pub regions_png: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<DemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

/// Preset options with the user's overrides merged in field by field.
fn detector_options(
    preset: SkinPreset,
    overrides: &serde_json::Map<String, serde_json::Value>,
) -> Result<DetectorOptions, String> {
    let base = DetectorOptions::from_preset(preset);
    if overrides.is_empty() {
        return Ok(base);
    }
    let mut value = serde_json::to_value(&base)
        .map_err(|e| format!("Failed to serialize detector options: {e}"))?;
    if let Some(fields) = value.as_object_mut() {
        for (key, v) in overrides {
            fields.insert(key.clone(), v.clone());
        }
    }
    serde_json::from_value(value).map_err(|e| format!("Invalid detector options: {e}"))
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let image = load_rgb_image(&config.input)?;
    let options = detector_options(config.preset, &config.detector)?;
    let detector = FaceRegionDetector::new(DetectorConfig::new(options));
    let (mut report, mask) = detector
        .process_with_mask(&image)
        .map_err(|e| format!("Detection failed: {e}"))?;

    if let Some(model_path) = &config.classifier {
        let model: LinearClassifier = read_json_file(model_path)?;
        let extractor =
            FeatureExtractor::from_options(&config.hog).map_err(|e| format!("Invalid HOG options: {e}"))?;
        let verdicts = classify_regions(&image, &report.regions, &extractor, &model)
            .map_err(|e| format!("Classification failed: {e}"))?;
        report.classified = Some(verdicts);
    }

    write_json_file(&config.output.report_json, &report)?;
    if let Some(path) = &config.output.mask_png {
        save_mask_png(&mask, path)?;
        println!("Saved skin mask to {}", path.display());
    }
    if let Some(path) = &config.output.regions_png {
        save_regions_png(&image, &report.regions, Rgb::new(0, 255, 0), path)?;
        println!("Saved region overlay to {}", path.display());
    }

    println!(
        "Found {} candidate regions in {}x{} image (scale {}, {:.1} ms)",
        report.regions.len(),
        report.input.width,
        report.input.height,
        report.scale,
        report.timings.total_ms
    );
    if let Some(faces) = report.face_count() {
        println!("Classifier accepted {faces} of {}", report.regions.len());
    }
    println!("Saved report to {}", config.output.report_json.display());

    Ok(())
}

fn usage() -> String {
    "Usage: face_regions_demo <config.json>".to_string()
}
