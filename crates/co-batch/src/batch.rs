use co_core::ImageView;
use co_hemi::{
    Error, OpennessConfig, OpennessResult, RingWeights, TrigTable, estimate_openness_with,
};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::metadata::PhotoMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatchConfig {
    pub openness: OpennessConfig,
    /// Parse file names into [`PhotoMetadata`]. Unparseable names leave
    /// `metadata` empty without failing the image.
    pub parse_metadata: bool,
}

/// One binary image (non-zero = sky) and the name it is reported under.
#[derive(Debug, Clone, Copy)]
pub struct BatchItem<'a> {
    pub name: &'a str,
    pub image: ImageView<'a, u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchRecord {
    pub name: String,
    pub metadata: Option<PhotoMetadata>,
    pub outcome: Result<OpennessResult, Error>,
}

impl BatchRecord {
    pub fn openness(&self) -> Option<f64> {
        self.outcome.as_ref().ok().map(|r| r.openness)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchReport {
    pub records: Vec<BatchRecord>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.succeeded()
    }

    /// Mean openness over successful images, `None` if there are none.
    pub fn mean_openness(&self) -> Option<f64> {
        let values: Vec<f64> = self.records.iter().filter_map(BatchRecord::openness).collect();
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    }
}

pub fn run_batch(items: &[BatchItem<'_>], cfg: &BatchConfig) -> BatchReport {
    let trig = TrigTable::new();
    let weights = RingWeights::new(cfg.openness.normalization);
    let process = |item: &BatchItem<'_>| process_item(item, cfg, &trig, &weights);

    #[cfg(feature = "rayon")]
    let records: Vec<BatchRecord> = items.par_iter().map(process).collect();

    #[cfg(not(feature = "rayon"))]
    let records: Vec<BatchRecord> = items.iter().map(process).collect();

    let report = BatchReport { records };
    tracing::info!(
        "batch finished: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
    report
}

fn process_item(
    item: &BatchItem<'_>,
    cfg: &BatchConfig,
    trig: &TrigTable,
    weights: &RingWeights,
) -> BatchRecord {
    let metadata = if cfg.parse_metadata {
        match PhotoMetadata::parse(item.name) {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::debug!("{}: no metadata ({e})", item.name);
                None
            }
        }
    } else {
        None
    };

    let outcome = estimate_openness_with(&item.image, &cfg.openness, trig, weights);
    match &outcome {
        Ok(r) => tracing::debug!("{}: openness {:.4}", item.name, r.openness),
        Err(e) => tracing::warn!("{}: skipped ({e})", item.name),
    }

    BatchRecord {
        name: item.name.to_owned(),
        metadata,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use co_core::Image;

    use super::{BatchConfig, BatchItem, BatchRecord, BatchReport, run_batch};

    #[test]
    fn empty_batch_has_no_mean() {
        let report = run_batch(&[], &BatchConfig::default());
        assert_eq!(report, BatchReport::default());
        assert_eq!(report.mean_openness(), None);
    }

    #[test]
    fn metadata_is_only_parsed_on_request() {
        let img = Image::new_fill(16, 16, 1u8);
        let items = [BatchItem {
            name: "P1.S2.20210501.p1.JPG",
            image: img.as_view(),
        }];

        let plain = run_batch(&items, &BatchConfig::default());
        assert!(plain.records[0].metadata.is_none());

        let cfg = BatchConfig {
            parse_metadata: true,
            ..BatchConfig::default()
        };
        let keyed = run_batch(&items, &cfg);
        let meta = keyed.records[0].metadata.as_ref().expect("parsed metadata");
        assert_eq!(meta.subplot, "S2");
        assert_eq!(keyed.records[0].openness().map(|v| v > 0.99), Some(true));
    }

    #[test]
    fn record_openness_is_none_on_failure() {
        let img: Image<u8> = Image::from_vec(0, 0, Vec::new()).expect("empty image");
        let report = run_batch(
            &[BatchItem {
                name: "empty",
                image: img.as_view(),
            }],
            &BatchConfig::default(),
        );
        let record: &BatchRecord = &report.records[0];
        assert!(record.outcome.is_err());
        assert_eq!(record.openness(), None);
        assert_eq!(report.failed(), 1);
    }
}
