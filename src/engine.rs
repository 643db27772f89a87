use std::path::PathBuf;

use log::info;
use serde::Serialize;

use crate::error::SigError;
use crate::store::{Sample, SampleRole, SignatureStore};

/// One sample's comparison outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredSample {
    pub path: PathBuf,
    pub score: f64,
}

/// Per-identity comparison results, both sample sets in listing order.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub identity: String,
    pub genuine: Vec<ScoredSample>,
    pub forged: Vec<ScoredSample>,
}

/// Score an ordered set of samples against one model, one score per sample.
/// No aggregation; callers receive the raw sequence.
pub fn compare_all(model: &Sample, samples: &[Sample], ink_threshold: i32) -> Vec<ScoredSample> {
    samples
        .iter()
        .map(|sample| ScoredSample {
            path: sample.path.clone(),
            score: sigmatch_pixel::score(&sample.image, &model.image, ink_threshold),
        })
        .collect()
}

/// Load an identity's model plus both sample sets and score them all.
pub fn run_comparison(
    store: &impl SignatureStore,
    identity: &str,
    ink_threshold: i32,
) -> Result<ComparisonReport, SigError> {
    let model = store.load_model(identity)?;
    info!("model for {}: {}", identity, model.path.display());

    let genuine = store.load_samples(identity, SampleRole::Genuine)?;
    let forged = store.load_samples(identity, SampleRole::Forged)?;
    info!(
        "loaded {} genuine and {} forged sample(s)",
        genuine.len(),
        forged.len()
    );

    Ok(ComparisonReport {
        identity: identity.to_string(),
        genuine: compare_all(&model, &genuine, ink_threshold),
        forged: compare_all(&model, &forged, ink_threshold),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};
    use std::collections::HashMap;

    /// In-memory store fixture exercising the trait seam.
    struct MemStore {
        models: HashMap<String, Sample>,
        genuine: HashMap<String, Vec<Sample>>,
        forged: HashMap<String, Vec<Sample>>,
    }

    impl SignatureStore for MemStore {
        fn identities(&self) -> Result<Vec<String>, SigError> {
            Ok(self.models.keys().cloned().collect())
        }

        fn load_model(&self, identity: &str) -> Result<Sample, SigError> {
            let sample = self
                .models
                .get(identity)
                .ok_or_else(|| SigError::ModelNotFound(identity.to_string()))?;
            Ok(Sample {
                path: sample.path.clone(),
                image: sample.image.clone(),
            })
        }

        fn load_samples(&self, identity: &str, role: SampleRole) -> Result<Vec<Sample>, SigError> {
            let set = match role {
                SampleRole::Genuine => &self.genuine,
                SampleRole::Forged => &self.forged,
            };
            let samples = set.get(identity).ok_or_else(|| SigError::SampleDirNotFound {
                identity: identity.to_string(),
                role,
            })?;
            Ok(samples
                .iter()
                .map(|s| Sample {
                    path: s.path.clone(),
                    image: s.image.clone(),
                })
                .collect())
        }
    }

    fn sample(name: &str, image: DynamicImage) -> Sample {
        Sample {
            path: PathBuf::from(name),
            image,
        }
    }

    fn half_ink_model() -> DynamicImage {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        for y in 0..10 {
            for x in 0..5 {
                img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
        DynamicImage::ImageRgba8(img)
    }

    fn store_for_brandon() -> MemStore {
        let white = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            10,
            10,
            Rgba([255, 255, 255, 255]),
        ));
        MemStore {
            models: HashMap::from([(
                "brandon".to_string(),
                sample("brandon_model.png", half_ink_model()),
            )]),
            genuine: HashMap::from([(
                "brandon".to_string(),
                vec![sample("brandon_genuine/sig1.png", half_ink_model())],
            )]),
            forged: HashMap::from([(
                "brandon".to_string(),
                vec![sample("brandon_forged/f1.png", white)],
            )]),
        }
    }

    #[test]
    fn scores_both_sets_in_order() {
        let store = store_for_brandon();
        let report = run_comparison(&store, "brandon", sigmatch_pixel::GRAY).unwrap();

        assert_eq!(report.identity, "brandon");
        assert_eq!(report.genuine.len(), 1);
        assert_eq!(report.genuine[0].score, 0.5);
        assert_eq!(report.forged.len(), 1);
        assert_eq!(report.forged[0].score, 0.0);
    }

    #[test]
    fn missing_model_yields_no_scores() {
        let store = store_for_brandon();
        let err = run_comparison(&store, "carly", sigmatch_pixel::GRAY).unwrap_err();
        assert!(matches!(err, SigError::ModelNotFound(id) if id == "carly"));
    }

    #[test]
    fn missing_sample_directory_aborts_the_request() {
        let mut store = store_for_brandon();
        store.forged.clear();
        let err = run_comparison(&store, "brandon", sigmatch_pixel::GRAY).unwrap_err();
        assert!(matches!(
            err,
            SigError::SampleDirNotFound {
                role: SampleRole::Forged,
                ..
            }
        ));
    }

    #[test]
    fn compare_all_preserves_sample_order() {
        let model = sample("m.png", half_ink_model());
        let samples = vec![
            sample("a.png", half_ink_model()),
            sample(
                "b.png",
                DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                    10,
                    10,
                    Rgba([255, 255, 255, 255]),
                )),
            ),
        ];
        let scored = compare_all(&model, &samples, sigmatch_pixel::GRAY);
        assert_eq!(scored[0].path, PathBuf::from("a.png"));
        assert_eq!(scored[0].score, 0.5);
        assert_eq!(scored[1].path, PathBuf::from("b.png"));
        assert_eq!(scored[1].score, 0.0);
    }
}
