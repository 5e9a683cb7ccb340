//! Mapping between response labels and zero-based class indices.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Sorted class table plus the per-row class index of a response vector.
#[derive(Debug, Clone)]
pub(crate) struct EncodedLabels {
    pub(crate) classes: Vec<String>,
    pub(crate) indices: Vec<usize>,
}

/// Order labels numerically when both parse as numbers, lexically otherwise.
fn compare_labels(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

pub(crate) fn encode<S: AsRef<str>>(response: &[S]) -> EncodedLabels {
    let mut classes: Vec<String> = response.iter().map(|s| s.as_ref().to_string()).collect();
    classes.sort_unstable_by(|a, b| compare_labels(a, b));
    classes.dedup();

    let lookup: HashMap<&str, usize> = classes
        .iter()
        .enumerate()
        .map(|(idx, class)| (class.as_str(), idx))
        .collect();
    let indices = response.iter().map(|s| lookup[s.as_ref()]).collect();

    EncodedLabels { classes, indices }
}
