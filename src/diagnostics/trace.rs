use crate::image::{ImageF32, ImageRgbF32, ImageView};
use serde::{Deserialize, Serialize};

/// Image recorded in the trace: single-channel (grayscale or `{0,1}` mask)
/// or interleaved RGB.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceImage {
    Gray(ImageF32),
    Rgb(ImageRgbF32),
}

impl TraceImage {
    pub fn width(&self) -> usize {
        match self {
            TraceImage::Gray(img) => img.width(),
            TraceImage::Rgb(img) => img.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            TraceImage::Gray(img) => img.height(),
            TraceImage::Rgb(img) => img.height(),
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            TraceImage::Gray(img) => img.channels(),
            TraceImage::Rgb(img) => img.channels(),
        }
    }

    /// Mean over all samples of all channels.
    pub fn mean_intensity(&self) -> f32 {
        let (sum, n) = match self {
            TraceImage::Gray(img) => (img.data.iter().map(|&v| v as f64).sum::<f64>(), img.data.len()),
            TraceImage::Rgb(img) => (img.data.iter().map(|&v| v as f64).sum::<f64>(), img.data.len()),
        };
        (sum / n.max(1) as f64) as f32
    }

    pub fn as_gray(&self) -> Option<&ImageF32> {
        match self {
            TraceImage::Gray(img) => Some(img),
            TraceImage::Rgb(_) => None,
        }
    }

    pub fn as_rgb(&self) -> Option<&ImageRgbF32> {
        match self {
            TraceImage::Rgb(img) => Some(img),
            TraceImage::Gray(_) => None,
        }
    }
}

impl From<ImageF32> for TraceImage {
    fn from(img: ImageF32) -> Self {
        TraceImage::Gray(img)
    }
}

impl From<ImageRgbF32> for TraceImage {
    fn from(img: ImageRgbF32) -> Self {
        TraceImage::Rgb(img)
    }
}

/// One recorded stage output with its human-readable label.
#[derive(Clone, Debug)]
pub struct TraceEntry {
    pub label: String,
    pub image: TraceImage,
}

/// Ordered record of every intermediate image; insertion order is execution order.
#[derive(Clone, Debug, Default)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, image: impl Into<TraceImage>) {
        self.entries.push(TraceEntry {
            label: label.into(),
            image: image.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TraceEntry> {
        self.entries.last()
    }

    pub fn get(&self, label: &str) -> Option<&TraceEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceEntry> {
        self.entries.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Lightweight serializable description of every entry.
    pub fn summaries(&self) -> Vec<TraceEntrySummary> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, e)| TraceEntrySummary {
                index,
                label: e.label.clone(),
                width: e.image.width(),
                height: e.image.height(),
                channels: e.image.channels(),
                mean_intensity: e.image.mean_intensity(),
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Statistics describing one trace entry without its pixels.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceEntrySummary {
    pub index: usize,
    pub label: String,
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub mean_intensity: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_insertion_order() {
        let mut trace = Trace::new();
        trace.push("first", ImageF32::filled(4, 2, 1.0));
        trace.push("second", ImageRgbF32::new(4, 2));
        assert_eq!(trace.labels().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(trace.last().map(|e| e.image.channels()), Some(3));

        let summaries = trace.summaries();
        assert_eq!(summaries[0].mean_intensity, 1.0);
        assert_eq!(summaries[1].width, 4);
        assert_eq!(summaries[1].height, 2);
    }
}
