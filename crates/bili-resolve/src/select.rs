use crate::provider::StreamCandidate;
use crate::settings::QualityFallback;

/// Picks the video stream for a part.
///
/// An exact match on the desired quality code wins; otherwise the fallback
/// policy takes over. Ties on the code keep the earlier candidate, matching
/// the service's own ordering of codec variants.
pub fn pick_video<'a>(
    candidates: &'a [StreamCandidate],
    desired: Option<u32>,
    fallback: QualityFallback,
) -> Option<&'a StreamCandidate> {
    if let Some(qn) = desired
        && let Some(exact) = candidates.iter().find(|candidate| candidate.id == qn)
    {
        return Some(exact);
    }
    pick_by_policy(candidates, fallback)
}

/// Picks the audio stream for a part. Audio has no user-facing quality
/// setting, so the fallback policy orders the list outright.
pub fn pick_audio(
    candidates: &[StreamCandidate],
    fallback: QualityFallback,
) -> Option<&StreamCandidate> {
    pick_by_policy(candidates, fallback)
}

fn pick_by_policy(
    candidates: &[StreamCandidate],
    fallback: QualityFallback,
) -> Option<&StreamCandidate> {
    match fallback {
        QualityFallback::Best => candidates
            .iter()
            .reduce(|best, next| if next.id > best.id { next } else { best }),
        QualityFallback::Worst => candidates
            .iter()
            .reduce(|worst, next| if next.id < worst.id { next } else { worst }),
    }
}
