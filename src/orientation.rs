use crate::geometry::Mm;
use crate::skyline::{Skyline, Slot};

/// Orientation chosen for one unit: the slot it rests in and whether
/// the footprint is rotated 90°.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub slot: Slot,
    pub rotated: bool,
}

/// Picks between the upright and rotated orientation of one unit.
///
/// Each orientation is evaluated at its best skyline slot; the one
/// whose placement results in the lower skyline (smaller bottom edge)
/// wins, and an exact tie keeps the unit upright. Pass `rotated: None`
/// when rotation is disallowed for the unit or pointless (square
/// footprint). Pure function of its inputs.
pub fn best_orientation(
    skyline: &Skyline,
    upright: (Mm, Mm),
    rotated: Option<(Mm, Mm)>,
) -> Option<Candidate> {
    let up = skyline.find_slot(upright.0, upright.1).map(|slot| Candidate {
        slot,
        rotated: false,
    });
    let rot = rotated
        .and_then(|(w, h)| skyline.find_slot(w, h).map(|slot| (slot, h)))
        .map(|(slot, h)| (Candidate { slot, rotated: true }, slot.y + h));

    match (up, rot) {
        (Some(u), Some((r, r_bottom))) => {
            let u_bottom = u.slot.y + upright.1;
            if r_bottom < u_bottom { Some(r) } else { Some(u) }
        }
        (Some(u), None) => Some(u),
        (None, Some((r, _))) => Some(r),
        (None, None) => None,
    }
}
