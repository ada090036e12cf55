//! Pairwise AABB overlap testing
//!
//! One predicate serves ground contact, player-vs-obstacle, and
//! player-vs-item; callers differ only in what they do with a hit. The y
//! test reads `a`'s next vertical position (`bottom + velocity.y`) so a
//! fast-falling body cannot tunnel through the ground between frames. That
//! makes the test asymmetric in y: `overlaps(a, b)` can differ from
//! `overlaps(b, a)` when their y-velocities differ.

use super::body::Body;

/// True iff the boxes overlap on all three axes simultaneously
pub fn overlaps(a: &Body, b: &Body) -> bool {
    debug_assert!(
        a.size.width >= 0.0 && a.size.height >= 0.0 && a.size.depth >= 0.0,
        "degenerate box on body {}",
        a.id
    );

    let x = a.faces.right >= b.faces.left && a.faces.left <= b.faces.right;
    let y = a.faces.bottom + a.velocity.y <= b.faces.top && a.faces.top >= b.faces.bottom;
    let z = a.faces.front >= b.faces.back && a.faces.back <= b.faces.front;

    x && y && z
}
