use crate::gallery::{wrap_next, wrap_previous};

/// Index math for the reviews carousel; one slide visible at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn next(&mut self) {
        self.index = wrap_next(self.index, self.len);
    }

    pub fn previous(&mut self) {
        self.index = wrap_previous(self.index, self.len);
    }

    /// Out-of-range targets are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.len > 0 && self.index == index
    }

    /// Horizontal offset of the slide track, in percent of one slide.
    pub fn track_offset_percent(&self) -> f64 {
        -(self.index as f64) * 100.0
    }
}
