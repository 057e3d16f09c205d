use tracing::debug;

use crate::video::types::{TargetSize, VideoClip};

/// Largest tempo change a single ffmpeg `atempo` stage is given
const ATEMPO_MAX: f64 = 2.0;
/// Smallest tempo change a single ffmpeg `atempo` stage accepts
const ATEMPO_MIN: f64 = 0.5;

/// Scale the clip's playback speed by `factor`.
///
/// Factors below 1 stretch the clip, above 1 shorten it. A factor of
/// exactly 1 returns the clip untouched. The factor must be positive and
/// finite; configuration validation guarantees this for pipeline runs.
pub fn apply_slow_motion(clip: VideoClip, factor: f64) -> VideoClip {
    debug_assert!(factor.is_finite() && factor > 0.0);
    if factor == 1.0 {
        return clip;
    }

    let before = clip.duration();
    let clip = clip.push_speed(factor);
    debug!(
        "Speed x{} on {}: {:.2}s -> {:.2}s",
        factor,
        clip.display_name(),
        before,
        clip.duration()
    );
    clip
}

/// Resize the clip to exactly `target`, ignoring its aspect ratio
pub fn scale_video(clip: VideoClip, target: TargetSize) -> VideoClip {
    if clip.size() == target {
        return clip;
    }

    debug!("Scaling {} from {} to {}", clip.display_name(), clip.size(), target);
    clip.push_scale(target)
}

/// Split a tempo factor into `atempo` stages whose product is `factor`
pub fn atempo_chain(factor: f64) -> Vec<f64> {
    let mut stages = Vec::new();
    let mut remaining = factor;

    while remaining < ATEMPO_MIN {
        stages.push(ATEMPO_MIN);
        remaining /= ATEMPO_MIN;
    }
    while remaining > ATEMPO_MAX {
        stages.push(ATEMPO_MAX);
        remaining /= ATEMPO_MAX;
    }
    stages.push(remaining);
    stages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(width: u32, height: u32, duration: f64) -> VideoClip {
        VideoClip::new("clip.mp4", TargetSize::new(width, height), duration, 30.0, true)
    }

    #[test]
    fn test_slow_motion_stretches() {
        let slowed = apply_slow_motion(clip(640, 480, 2.0), 0.5);
        assert_eq!(slowed.duration(), 4.0);
        assert_eq!(slowed.source_duration(), 2.0);
        assert_eq!(slowed.speed_factor(), 0.5);
    }

    #[test]
    fn test_speed_up_shortens() {
        let fast = apply_slow_motion(clip(640, 480, 3.0), 1.5);
        assert!(fast.duration() < 3.0);
        assert!((fast.duration() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_unit_factor_is_identity() {
        let same = apply_slow_motion(clip(640, 480, 3.0), 1.0);
        assert_eq!(same.duration(), 3.0);
        assert!(same.transforms().is_empty());
    }

    #[test]
    fn test_scale_forces_exact_size() {
        let target = TargetSize::new(640, 480);
        let scaled = scale_video(clip(1280, 720, 3.0), target);
        assert_eq!(scaled.size(), target);
        assert_eq!(scaled.native_size(), TargetSize::new(1280, 720));
        assert!(scaled.is_scaled());
        assert_eq!(scaled.duration(), 3.0);
    }

    #[test]
    fn test_scale_to_own_size_records_nothing() {
        let unchanged = scale_video(clip(640, 480, 1.0), TargetSize::new(640, 480));
        assert!(!unchanged.is_scaled());
    }

    #[test]
    fn test_atempo_chain_stays_in_range() {
        for factor in [0.1, 0.3, 0.5, 0.7, 1.0, 2.0, 3.0, 10.0] {
            let chain = atempo_chain(factor);
            assert!(chain.iter().all(|s| (ATEMPO_MIN..=ATEMPO_MAX).contains(s)), "{:?}", chain);
            let product: f64 = chain.iter().product();
            assert!((product - factor).abs() < 1e-9, "factor {} -> {:?}", factor, chain);
        }
        assert_eq!(atempo_chain(0.25), vec![0.5, 0.5]);
        assert_eq!(atempo_chain(0.7), vec![0.7]);
    }
}
