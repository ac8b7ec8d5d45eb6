//! Statistical analysis of images.

use crate::image::{Image, Sample};

/// The source image's histogram: absolute sample counts per channel.
///
/// The intensity range of the sample type is divided into `samples`
/// classes; each sub-vector holds one channel's counts. Values outside
/// the nominal range (possible for floating-point images) are counted
/// in the edge classes.
pub fn histogram<T: Sample>(source: &Image<T>, samples: usize) -> Vec<Vec<usize>> {
    let channels = source.channels();
    let mut hist = vec![vec![0usize; samples]; channels];
    if samples == 0 || channels == 0 {
        return hist;
    }

    let min = T::RANGE.min.to_f64();
    let span = T::RANGE.max.to_f64() - min;
    for pixel in source.data().chunks_exact(channels) {
        for (chan, &value) in pixel.iter().enumerate() {
            let normalized = (value.to_f64() - min) / span;
            let class = (normalized * (samples - 1) as f64).round();
            let class = (class.max(0.0) as usize).min(samples - 1);
            hist[chan][class] += 1;
        }
    }

    hist
}
