use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Per-entry progress bar, drawn to stderr. Hidden bars cost nothing, so
/// extractors always drive one.
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    pub fn new(total: usize, message: &str, visible: bool) -> Self {
        let bar = ProgressBar::with_draw_target(
            Some(total as u64),
            if visible {
                ProgressDrawTarget::stderr()
            } else {
                ProgressDrawTarget::hidden()
            },
        );
        bar.set_style(
            ProgressStyle::with_template("{msg} {wide_bar:.cyan/blue} {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(message.to_string());
        Self { bar }
    }

    pub fn inc(&self) {
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_bar_still_counts() {
        let progress = Progress::new(3, "peps", false);
        progress.inc();
        progress.inc();
        assert_eq!(progress.bar.position(), 2);
        progress.finish();
    }
}
