use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::{Tick, VisiblePoint};

/// Marker drawing switches shared by both axes.
#[derive(Debug, Clone, Default)]
pub struct MarkerOpts {
    /// Dashed reference line across the plot at the marker position.
    pub line: bool,
    /// Domain value on the opposite axis for an intersection dot.
    pub dot_at: Option<f64>,
    /// Icon badge drawn next to the label.
    pub icon: Option<String>,
}

/// Nearest visible point to a cursor position, scanning from the end
/// backward and stopping as soon as the distance grows.
///
/// This is a greedy approximation that assumes recency-biased hover over a
/// roughly monotonic distance profile; it is intentionally not a binary
/// search.
#[must_use]
pub fn nearest_visible_point(visible: &[VisiblePoint], cursor_x: f64) -> Option<usize> {
    let mut best: Option<(usize, OrderedFloat<f64>)> = None;
    for (index, point) in visible.iter().enumerate().rev() {
        let dist = OrderedFloat((point.x - cursor_x).abs());
        match best {
            Some((_, best_dist)) if dist > best_dist => break,
            Some((_, best_dist)) if dist < best_dist => best = Some((index, dist)),
            None => best = Some((index, dist)),
            Some(_) => {}
        }
    }
    best.map(|(index, _)| index)
}

/// The pair of generated ticks bracketing a pixel position, for the
/// hovered-interval readout.
#[must_use]
pub fn bracketing_ticks(ticks: &[Tick], pos: f64) -> Option<(Tick, Tick)> {
    let mut pair: SmallVec<[Tick; 2]> = SmallVec::new();
    for window in ticks.windows(2) {
        let (lo, hi) = if window[0].pos <= window[1].pos {
            (window[0], window[1])
        } else {
            (window[1], window[0])
        };
        if lo.pos <= pos && pos <= hi.pos {
            pair.push(lo);
            pair.push(hi);
            break;
        }
    }
    match (pair.first(), pair.get(1)) {
        (Some(lo), Some(hi)) => Some((*lo, *hi)),
        _ => None,
    }
}
