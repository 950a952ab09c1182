//! Count-up animation for the homepage statistics ("10,000+", "95%", ...).

use crate::config::COUNTER_STEPS;

/// One frame of a running counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterFrame {
    pub text: String,
    pub done: bool,
}

/// Animates a statistic from zero up to its printed value.
///
/// The numeric part is every digit in the text; the suffix is whatever remains
/// once digits and thousands separators are removed. The last frame always
/// shows the original text unchanged.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    final_text: String,
    target: f64,
    suffix: String,
    current: f64,
    increment: f64,
    finished: bool,
}

impl CounterAnimation {
    /// `None` when the text carries no digits to count towards.
    pub fn parse(final_text: &str) -> Option<Self> {
        let digits: String = final_text.chars().filter(char::is_ascii_digit).collect();
        let target: u64 = digits.parse().ok()?;
        let suffix = final_text
            .chars()
            .filter(|c| !c.is_ascii_digit() && *c != ',')
            .collect();
        let target = target as f64;
        Some(Self {
            final_text: final_text.to_string(),
            target,
            suffix,
            current: 0.0,
            increment: target / f64::from(COUNTER_STEPS),
            finished: false,
        })
    }

    /// Advance one tick.
    pub fn tick(&mut self) -> CounterFrame {
        if !self.finished {
            self.current += self.increment;
            self.finished = self.current >= self.target;
        }
        if self.finished {
            return CounterFrame {
                text: self.final_text.clone(),
                done: true,
            };
        }
        CounterFrame {
            text: format!("{}{}", group_thousands(self.current.floor() as u64), self.suffix),
            done: false,
        }
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn splits_number_and_suffix() {
        let anim = CounterAnimation::parse("10,000+").unwrap();
        assert_eq!(anim.target, 10_000.0);
        assert_eq!(anim.suffix, "+");
        assert!(CounterAnimation::parse("Many").is_none());
    }

    #[test]
    fn first_frame_is_one_step() {
        let mut anim = CounterAnimation::parse("10,000+").unwrap();
        let frame = anim.tick();
        assert_eq!(frame.text, "200+");
        assert!(!frame.done);
    }

    #[test]
    fn ends_on_the_original_text() {
        let mut anim = CounterAnimation::parse("95%").unwrap();
        let mut ticks = 0;
        let last = loop {
            let frame = anim.tick();
            ticks += 1;
            if frame.done {
                break frame;
            }
            assert!(ticks <= COUNTER_STEPS + 1, "counter never finished");
        };
        assert_eq!(last.text, "95%");
        assert!(ticks >= COUNTER_STEPS);
        assert_eq!(anim.tick(), last);
    }

    #[test]
    fn every_homepage_stat_reports_done_within_the_step_budget() {
        for value in ["10,000+", "50+", "120+", "95%"] {
            let mut anim = CounterAnimation::parse(value).unwrap();
            let done_at = (1..=COUNTER_STEPS + 1).find(|_| anim.tick().done);
            assert!(done_at.is_some(), "{} never reported done", value);
        }
    }
}
