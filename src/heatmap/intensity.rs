/// Discrete shade of a heatmap cell, from no activity (`Zero`) to the most
/// active days of the year (`Four`)
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub(crate) enum Intensity {
    Zero,
    One,
    Two,
    Three,
    Four,
}

impl Intensity {
    pub(crate) const ALL: [Intensity; 5] = [
        Intensity::Zero,
        Intensity::One,
        Intensity::Two,
        Intensity::Three,
        Intensity::Four,
    ];

    /// Classify `count` relative to the busiest day, `max_count`.
    ///
    /// Thresholds are quarters of `max_count`: a count of at least 3/4 of the
    /// maximum is `Four`, at least 1/2 is `Three`, at least 1/4 is `Two`, and
    /// any other nonzero count is `One`.  When `max_count` is at most 1, every
    /// nonzero count is `Four`.
    pub(crate) fn classify(count: u32, max_count: u32) -> Intensity {
        if count == 0 {
            return Intensity::Zero;
        }
        if max_count <= 1 {
            return Intensity::Four;
        }
        // Compare `count / max_count` against the thresholds without leaving
        // integer arithmetic
        let count = u64::from(count);
        let max_count = u64::from(max_count);
        if 4 * count >= 3 * max_count {
            Intensity::Four
        } else if 2 * count >= max_count {
            Intensity::Three
        } else if 4 * count >= max_count {
            Intensity::Two
        } else {
            Intensity::One
        }
    }

    pub(crate) fn level(self) -> usize {
        match self {
            Intensity::Zero => 0,
            Intensity::One => 1,
            Intensity::Two => 2,
            Intensity::Three => 3,
            Intensity::Four => 4,
        }
    }
}
