//! Progressive probabilistic Hough transform for straight segments.
//!
//! Foreground pixels (non-zero) are visited in random order. Each visited
//! pixel votes into a `(theta, rho)` accumulator; as soon as one bin reaches
//! `threshold` votes, the corridor along that line is walked in both
//! directions, tolerating up to `max_line_gap` consecutive background pixels.
//! Walked pixels are removed from further consideration and, if the resulting
//! segment is long enough, their votes are withdrawn again.
//!
//! The visiting order comes from a seeded `StdRng`, so results are
//! reproducible for a given image and parameter set.

use std::f32::consts::PI;

use nalgebra::Point2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::GrayImageView;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Fixed-point shift used while stepping along the minor axis.
const SHIFT: i32 = 16;

/// Parameters of the probabilistic line search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoughParams {
    /// Distance resolution of the accumulator in pixels.
    pub rho: f32,
    /// Angle resolution of the accumulator in radians.
    pub theta: f32,
    /// Minimum number of votes before a line is walked.
    pub threshold: u32,
    /// Minimum extent (along x or y) of an accepted segment.
    pub min_line_length: u32,
    /// Maximum run of background pixels bridged while walking a line.
    pub max_line_gap: u32,
    /// Stop after this many segments.
    pub max_lines: usize,
    pub seed: u64,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            rho: 1.0,
            theta: PI / 180.0,
            threshold: 200,
            min_line_length: 200,
            max_line_gap: 50,
            max_lines: usize::MAX,
            seed: 0xffff_ffff,
        }
    }
}

/// Line segment with inclusive integer endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point2<i32>,
    pub end: Point2<i32>,
}

impl LineSegment {
    /// Euclidean distance between the endpoints.
    pub fn length(&self) -> f32 {
        let dx = (self.end.x - self.start.x) as f32;
        let dy = (self.end.y - self.start.y) as f32;
        dx.hypot(dy)
    }
}

struct Accumulator {
    trig: Vec<(f32, f32)>,
    num_rho: usize,
    rho_offset: i32,
    votes: Vec<i32>,
}

impl Accumulator {
    fn new(width: i32, height: i32, rho: f32, theta: f32) -> Self {
        let inv_rho = 1.0 / rho;
        let num_angle = ((PI / theta).round() as usize).max(1);
        let num_rho = (((width + height) * 2 + 1) as f32 / rho).round() as usize;
        let trig = (0..num_angle)
            .map(|n| {
                let angle = n as f32 * theta;
                (angle.cos() * inv_rho, angle.sin() * inv_rho)
            })
            .collect();

        Self {
            trig,
            num_rho,
            rho_offset: (num_rho as i32 - 1) / 2,
            votes: vec![0; num_angle * num_rho],
        }
    }

    #[inline]
    fn bin(&self, n: usize, x: i32, y: i32) -> usize {
        let (c, s) = self.trig[n];
        let r = (x as f32 * c + y as f32 * s).round() as i32 + self.rho_offset;
        n * self.num_rho + r as usize
    }

    /// Add a vote for every angle. Returns the angle index of the strongest
    /// bin that reached `threshold`, if any.
    fn vote(&mut self, x: i32, y: i32, threshold: i32) -> Option<usize> {
        let mut best = threshold - 1;
        let mut best_n = None;
        for n in 0..self.trig.len() {
            let idx = self.bin(n, x, y);
            self.votes[idx] += 1;
            if self.votes[idx] > best {
                best = self.votes[idx];
                best_n = Some(n);
            }
        }
        best_n
    }

    fn withdraw(&mut self, x: i32, y: i32) {
        for n in 0..self.trig.len() {
            let idx = self.bin(n, x, y);
            self.votes[idx] -= 1;
        }
    }
}

/// Fixed-point walker along a line direction.
#[derive(Clone, Copy)]
struct Walker {
    x_major: bool,
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
}

impl Walker {
    fn new(px: i32, py: i32, dir_x: f32, dir_y: f32) -> Self {
        let one = (1 << SHIFT) as f32;
        if dir_x.abs() > dir_y.abs() {
            Self {
                x_major: true,
                x: px,
                y: (py << SHIFT) + (1 << (SHIFT - 1)),
                dx: if dir_x > 0.0 { 1 } else { -1 },
                dy: (dir_y * one / dir_x.abs()).round() as i32,
            }
        } else {
            Self {
                x_major: false,
                x: (px << SHIFT) + (1 << (SHIFT - 1)),
                y: py,
                dx: (dir_x * one / dir_y.abs()).round() as i32,
                dy: if dir_y > 0.0 { 1 } else { -1 },
            }
        }
    }

    fn reversed(self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
            ..self
        }
    }

    #[inline]
    fn pixel(&self) -> (i32, i32) {
        if self.x_major {
            (self.x, self.y >> SHIFT)
        } else {
            (self.x >> SHIFT, self.y)
        }
    }

    #[inline]
    fn step(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
    }
}

/// Find straight segments among the non-zero pixels of `img`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img, params), fields(width = img.width, height = img.height))
)]
pub fn hough_lines_p(img: &GrayImageView<'_>, params: &HoughParams) -> Vec<LineSegment> {
    let (width, height) = (img.width as i32, img.height as i32);
    if width == 0 || height == 0 || params.rho <= 0.0 || params.theta <= 0.0 {
        return Vec::new();
    }

    let mut acc = Accumulator::new(width, height, params.rho, params.theta);
    let threshold = params.threshold.max(1) as i32;
    let min_len = params.min_line_length as i32;
    let max_gap = params.max_line_gap as i32;
    let index = |x: i32, y: i32| y as usize * img.width + x as usize;

    let mut mask = vec![false; img.width * img.height];
    let mut points = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if img.get(x as usize, y as usize) != 0 {
                mask[index(x, y)] = true;
                points.push((x, y));
            }
        }
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut lines = Vec::new();

    for remaining in (1..=points.len()).rev() {
        let pick = rng.gen_range(0..remaining);
        let (px, py) = points[pick];
        points.swap(pick, remaining - 1);

        // Already consumed by a previously walked line.
        if !mask[index(px, py)] {
            continue;
        }

        let Some(n) = acc.vote(px, py, threshold) else {
            continue;
        };

        let (c, s) = acc.trig[n];
        let forward = Walker::new(px, py, -s, c);
        let walkers = [forward, forward.reversed()];

        let mut ends = [(px, py); 2];
        for (end, walker) in ends.iter_mut().zip(walkers) {
            let mut w = walker;
            let mut gap = 0;
            loop {
                let (x, y) = w.pixel();
                if x < 0 || x >= width || y < 0 || y >= height {
                    break;
                }
                if mask[index(x, y)] {
                    gap = 0;
                    *end = (x, y);
                } else {
                    gap += 1;
                    if gap > max_gap {
                        break;
                    }
                }
                w.step();
            }
        }

        let long_enough =
            (ends[1].0 - ends[0].0).abs() >= min_len || (ends[1].1 - ends[0].1).abs() >= min_len;

        for (end, walker) in ends.iter().zip(walkers) {
            let mut w = walker;
            loop {
                let (x, y) = w.pixel();
                let idx = index(x, y);
                if mask[idx] {
                    if long_enough {
                        acc.withdraw(x, y);
                    }
                    mask[idx] = false;
                }
                if (x, y) == *end {
                    break;
                }
                w.step();
            }
        }

        if long_enough {
            lines.push(LineSegment {
                start: Point2::new(ends[0].0, ends[0].1),
                end: Point2::new(ends[1].0, ends[1].1),
            });
            if lines.len() >= params.max_lines {
                break;
            }
        }
    }

    log::trace!("hough: {} segment(s)", lines.len());
    lines
}
