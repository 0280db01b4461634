use crate::foundation::{
    core::{ProgressWindow, TargetId},
    error::{ScrublineError, ScrublineResult},
};

/// Target ids for `count` content slots: `prefix-0 .. prefix-{count-1}`.
pub fn slot_targets(prefix: &str, count: usize) -> Vec<TargetId> {
    (0..count)
        .map(|i| TargetId::new(format!("{prefix}-{i}")))
        .collect()
}

/// Spread `count` windows of length `each` across `span`.
///
/// The first window starts at `span.start` and the last ends at `span.end`. When `each` is
/// longer than the step between starts, neighbouring windows overlap and the cascade reads as a
/// pipeline rather than a strict sequence.
pub fn stagger_windows(
    count: usize,
    span: ProgressWindow,
    each: f64,
) -> ScrublineResult<Vec<ProgressWindow>> {
    span.validate()?;
    if count == 0 {
        return Ok(Vec::new());
    }
    if !(each.is_finite() && each > 0.0 && each <= span.len()) {
        return Err(ScrublineError::validation(format!(
            "stagger window length {each} must be in (0, {}]",
            span.len()
        )));
    }
    if count == 1 {
        return Ok(vec![ProgressWindow::new(span.start, span.start + each)?]);
    }

    let step = (span.len() - each) / (count - 1) as f64;
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let start = span.start + step * i as f64;
        // Pin the last window to the span end so rounding never leaves a gap.
        let end = if i + 1 == count {
            span.end
        } else {
            (start + each).min(span.end)
        };
        out.push(ProgressWindow::new(start, end)?);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
