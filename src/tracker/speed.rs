use std::collections::VecDeque;

use crate::shared::{geo::Coordinate, time::Timestamp};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub coordinate: Coordinate,
    pub at: Timestamp,
}

/// Average speed in km/h between the oldest and newest sample.
/// Zero with fewer than two samples or no elapsed time.
pub fn estimate_speed<'a, I>(samples: I) -> f64
where
    I: IntoIterator<Item = &'a Sample>,
    I::IntoIter: DoubleEndedIterator,
{
    let mut iter = samples.into_iter();
    let (Some(oldest), Some(newest)) = (iter.next(), iter.next_back()) else {
        return 0.0;
    };
    let hours = (newest.at - oldest.at).as_hours();
    if hours <= 0.0 {
        return 0.0;
    }
    oldest.coordinate.haversine(&newest.coordinate).as_kilometers() / hours
}

/// The most recent positions, oldest evicted first.
#[derive(Debug, Clone)]
pub struct SpeedWindow {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl Default for SpeedWindow {
    fn default() -> Self {
        Self::new(5)
    }
}

impl SpeedWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// A sample at the same instant as the newest one replaces it, so a
    /// repeated tick does not skew the estimate.
    pub fn push(&mut self, sample: Sample) -> f64 {
        if self.samples.back().is_some_and(|newest| newest.at == sample.at) {
            self.samples.pop_back();
        }
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
        self.speed()
    }

    pub fn speed(&self) -> f64 {
        estimate_speed(&self.samples)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
