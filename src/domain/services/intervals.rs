/// Closed-open interval `[start, end)` in minutes since local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteSpan {
    pub start: i32,
    pub end: i32,
}

impl MinuteSpan {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> i32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Touching spans (`a.end == b.start`) do not overlap.
pub fn overlaps(a: MinuteSpan, b: MinuteSpan) -> bool {
    a.start < b.end && b.start < a.end
}

/// Remove every cut from every base span, cut by cut. The final set does not
/// depend on the order of `cuts`. Pieces shorter than `min_len` are dropped
/// at the end; they cannot hold a slot at that granularity.
pub fn subtract(base: &[MinuteSpan], cuts: &[MinuteSpan], min_len: i32) -> Vec<MinuteSpan> {
    let mut result: Vec<MinuteSpan> = base.to_vec();

    for cut in cuts {
        let mut next = Vec::with_capacity(result.len() + 1);
        for span in result {
            if !overlaps(span, *cut) {
                next.push(span);
            } else if cut.start <= span.start && cut.end >= span.end {
                // fully covered, drop
            } else if cut.start <= span.start {
                next.push(MinuteSpan::new(cut.end, span.end));
            } else if cut.end >= span.end {
                next.push(MinuteSpan::new(span.start, cut.start));
            } else {
                // cut strictly inside, split
                next.push(MinuteSpan::new(span.start, cut.start));
                next.push(MinuteSpan::new(cut.end, span.end));
            }
        }
        result = next;
    }

    result.retain(|s| s.len() >= min_len);
    result
}
