/*!
Wall-kick offset tables used to resolve otherwise-blocked rotations.

Only the four clockwise transitions (`R0→R1`, `R1→R2`, `R2→R3`, `R3→R0`) are
stored, indexed by the source rotation; a counter-clockwise turn looks up the
clockwise row of the reverse transition and sign-negates every offset. Opposite
(180°) transitions are never requested.
*/

use crate::{Offset, PieceKind, Rotation};

/// Kicks shared by the J, L, S, T and Z pieces, clockwise `r → r+1`,
/// x right / y down, tried in order.
#[rustfmt::skip]
pub(crate) const STANDARD_KICKS: [[Offset; 5]; 4] = [
    [(0, 0), (-1, 0), (-1, -1), (0,  2), (-1,  2)], // R0 → R1
    [(0, 0), ( 1, 0), ( 1,  1), (0, -2), ( 1, -2)], // R1 → R2
    [(0, 0), ( 1, 0), ( 1, -1), (0,  2), ( 1,  2)], // R2 → R3
    [(0, 0), (-1, 0), (-1,  1), (0, -2), (-1, -2)], // R3 → R0
];

/// Kicks for the I piece, which needs a larger kick range.
#[rustfmt::skip]
pub(crate) const I_KICKS: [[Offset; 5]; 4] = [
    [(0, 0), (-2, 0), ( 1, 0), (-2,  1), ( 1, -2)], // R0 → R1
    [(0, 0), (-1, 0), ( 2, 0), (-1, -2), ( 2,  1)], // R1 → R2
    [(0, 0), ( 2, 0), (-1, 0), ( 2, -1), (-1,  2)], // R2 → R3
    [(0, 0), ( 1, 0), (-2, 0), ( 1,  2), (-2, -1)], // R3 → R0
];

/// The O piece rotates in place; it can never collide under rotation.
const IN_PLACE: [Offset; 1] = [(0, 0)];

/// The candidate offsets for rotating `kind` one quarter turn out of `from`,
/// in the order they should be tried.
pub(crate) fn kick_candidates(
    kind: PieceKind,
    from: Rotation,
    clockwise: bool,
) -> impl Iterator<Item = Offset> {
    let to = from.turned(if clockwise { 1 } else { -1 });
    // Clockwise rows are indexed by the transition's source rotation; for a
    // counter-clockwise turn that source is `to`, and the offsets mirror.
    let (row, negate) = if clockwise { (from, false) } else { (to, true) };
    let table: &'static [Offset] = match kind {
        PieceKind::O => &IN_PLACE,
        PieceKind::I => &I_KICKS[row as usize],
        _ => &STANDARD_KICKS[row as usize],
    };
    table
        .iter()
        .map(move |&(dx, dy)| if negate { (-dx, -dy) } else { (dx, dy) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ccw_kicks_mirror_cw() {
        // A counter-clockwise turn out of `r` undoes the clockwise turn out
        // of `r - 1`, so its candidates must be those offsets sign-negated.
        for kind in PieceKind::VARIANTS {
            for from in Rotation::VARIANTS {
                let ccw: Vec<_> = kick_candidates(kind, from, false).collect();
                let cw_negated: Vec<_> = kick_candidates(kind, from.turned(-1), true)
                    .map(|(dx, dy)| (-dx, -dy))
                    .collect();
                assert_eq!(ccw, cw_negated, "{kind:?} out of {from:?}");
            }
        }
    }

    #[test]
    fn ccw_candidates_match_srs_data() {
        // Pinned against the canonical counter-clockwise rows (`R1 → R0`).
        let standard: Vec<_> = kick_candidates(PieceKind::T, Rotation::R1, false).collect();
        assert_eq!(standard, vec![(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]);
        let long: Vec<_> = kick_candidates(PieceKind::I, Rotation::R1, false).collect();
        assert_eq!(long, vec![(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)]);
    }

    #[test]
    fn first_candidate_is_always_unkicked() {
        for kind in PieceKind::VARIANTS {
            for from in Rotation::VARIANTS {
                for clockwise in [true, false] {
                    let first = kick_candidates(kind, from, clockwise).next();
                    assert_eq!(first, Some((0, 0)));
                }
            }
        }
    }

    #[test]
    fn square_piece_rotates_in_place_only() {
        let all: Vec<_> = kick_candidates(PieceKind::O, Rotation::R2, true).collect();
        assert_eq!(all, vec![(0, 0)]);
    }
}
