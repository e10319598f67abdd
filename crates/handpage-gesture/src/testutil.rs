//! Synthetic hand poses for unit tests

use handpage_core::{FingerStates, HandLandmark as L, Landmark, LandmarkSet};

pub(crate) const WRIST: (f32, f32) = (0.5, 0.8);

/// Upright hand with the given fingers extended and the thumb tip offset
/// from the wrist by `(dx, rise)`; `rise > 0` puts the tip above the wrist.
pub(crate) fn pose(fingers: FingerStates, rise: f32, dx: f32) -> LandmarkSet {
    let mut set = LandmarkSet::default();
    set.set(L::Wrist, Landmark::planar(WRIST.0, WRIST.1));

    let tip = Landmark::planar(WRIST.0 + dx, WRIST.1 - rise);
    set.set(L::ThumbCmc, lerp(WRIST, (tip.x, tip.y), 0.25));
    set.set(L::ThumbMcp, lerp(WRIST, (tip.x, tip.y), 0.5));
    set.set(L::ThumbIp, lerp(WRIST, (tip.x, tip.y), 0.75));
    set.set(L::ThumbTip, tip);

    let chains = [
        (0.45, fingers.index, [L::IndexMcp, L::IndexPip, L::IndexDip, L::IndexTip]),
        (0.50, fingers.middle, [L::MiddleMcp, L::MiddlePip, L::MiddleDip, L::MiddleTip]),
        (0.55, fingers.ring, [L::RingMcp, L::RingPip, L::RingDip, L::RingTip]),
        (0.60, fingers.pinky, [L::PinkyMcp, L::PinkyPip, L::PinkyDip, L::PinkyTip]),
    ];
    for (x, extended, [mcp, pip, dip, tip]) in chains {
        set.set(mcp, Landmark::planar(x, 0.6));
        set.set(pip, Landmark::planar(x, 0.5));
        if extended {
            set.set(dip, Landmark::planar(x, 0.45));
            set.set(tip, Landmark::planar(x, 0.4));
        } else {
            set.set(dip, Landmark::planar(x, 0.55));
            set.set(tip, Landmark::planar(x, 0.58));
        }
    }
    set
}

fn lerp(a: (f32, f32), b: (f32, f32), t: f32) -> Landmark {
    Landmark::planar(a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
}

pub(crate) fn curled() -> FingerStates {
    FingerStates::new(false, false, false, false)
}

pub(crate) fn open() -> FingerStates {
    FingerStates::new(true, true, true, true)
}

pub(crate) fn thumbs_up() -> LandmarkSet {
    pose(curled(), 0.20, 0.0)
}

pub(crate) fn thumbs_down() -> LandmarkSet {
    pose(curled(), -0.15, 0.0)
}

pub(crate) fn fist() -> LandmarkSet {
    pose(curled(), 0.05, -0.03)
}

pub(crate) fn open_palm() -> LandmarkSet {
    pose(open(), 0.05, -0.18)
}

pub(crate) fn point_up() -> LandmarkSet {
    pose(FingerStates::new(true, false, false, false), 0.05, -0.03)
}

pub(crate) fn peace() -> LandmarkSet {
    pose(FingerStates::new(true, true, false, false), 0.05, -0.03)
}

/// Hand that matches no gesture (three fingers up, thumb resting)
pub(crate) fn unclassified() -> LandmarkSet {
    pose(FingerStates::new(true, true, true, false), 0.05, 0.0)
}
