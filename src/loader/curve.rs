use crate::data::curve::CurveFrames;
use crate::error::SkeletonError;
use crate::skeleton_data::animation::{CurveKeyframe, RawCurve};

/// One channel of the segment between two adjacent keyframes.
#[derive(Copy, Clone, Debug)]
pub(crate) struct CurveSegment {
    pub frame: usize,
    pub channel: usize,
    pub time1: f32,
    pub time2: f32,
    pub value1: f32,
    pub value2: f32,
    /// Applied to the control points' values, never to their times.
    pub scale: f32,
}

/// Records the curve of one segment channel. Returns the next free bezier
/// slot, which only advances when a bezier was set.
pub(crate) fn read_curve(
    curve: &RawCurve,
    frames: &mut CurveFrames,
    bezier: usize,
    segment: CurveSegment,
) -> Result<usize, SkeletonError> {
    match curve {
        RawCurve::Stepped(_) => {
            frames.set_stepped(segment.frame);
            Ok(bezier)
        }
        RawCurve::Bezier(controls) => {
            let start = segment.channel * 4;
            let controls = controls
                .get(start..start + 4)
                .ok_or(SkeletonError::InvalidCurve { frame: segment.frame, channel: segment.channel })?;
            frames.set_bezier(
                bezier,
                segment.frame,
                segment.channel,
                segment.time1,
                segment.value1,
                controls[0],
                controls[1] * segment.scale,
                controls[2],
                controls[3] * segment.scale,
                segment.time2,
                segment.value2,
            );
            Ok(bezier + 1)
        }
    }
}

/// Builds the frame table of a continuous timeline. `values` yields the
/// unscaled channel values of a key; channel `c` is multiplied by `scales[c]`.
/// With no channels the curves ease a 0 to 1 progress instead.
pub(crate) fn read_curve_frames<K, F>(keys: &[K], scales: &[f32], values: F) -> Result<CurveFrames, SkeletonError>
where
    K: CurveKeyframe,
    F: Fn(&K) -> Result<Vec<f32>, SkeletonError>,
{
    let channels = scales.len();
    let rows = keys
        .iter()
        .map(|key| {
            let scaled = values(key)?.iter().zip(scales).map(|(value, scale)| value * scale).collect::<Vec<_>>();
            Ok((key.time(), scaled))
        })
        .collect::<Result<Vec<_>, SkeletonError>>()?;

    let mut frames = CurveFrames::new(rows.len(), channels, rows.len().saturating_sub(1) * channels.max(1));
    for (frame, (time, values)) in rows.iter().enumerate() {
        frames.set_frame(frame, *time, values);
    }

    let used = keys
        .iter()
        .zip(rows.windows(2))
        .enumerate()
        .try_fold(0, |bezier, (frame, (key, pair))| {
            let curve = match key.curve() {
                Some(curve) => curve,
                None => return Ok(bezier),
            };
            let ((time1, values1), (time2, values2)) = (&pair[0], &pair[1]);
            (0..channels.max(1)).try_fold(bezier, |bezier, channel| {
                let segment = match channels {
                    0 => CurveSegment { frame, channel, time1: *time1, time2: *time2, value1: 0.0, value2: 1.0, scale: 1.0 },
                    _ => CurveSegment {
                        frame,
                        channel,
                        time1: *time1,
                        time2: *time2,
                        value1: values1[channel],
                        value2: values2[channel],
                        scale: scales[channel],
                    },
                };
                read_curve(curve, &mut frames, bezier, segment)
            })
        })?;
    frames.shrink(used);
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::curve::CurveType;
    use crate::skeleton_data::animation::RawCurveKeyframe;

    fn key(time: f32, value: f32, curve: Option<RawCurve>) -> RawCurveKeyframe {
        RawCurveKeyframe { time, value: Some(value), curve, ..RawCurveKeyframe::default() }
    }

    #[test]
    fn absent_curve_is_linear_and_needs_no_bezier() {
        let keys = vec![key(0.0, 0.0, None), key(1.0, 90.0, None)];
        let frames = read_curve_frames(&keys, &[1.0], |key| Ok(vec![key.value.unwrap_or(0.0)])).unwrap();
        assert_eq!(frames.curve_type(0), CurveType::Linear);
        assert_eq!(frames.bezier_count(), 0);
        assert!((frames.value_at(0.5, 0) - 45.0).abs() < 1e-4);
    }

    #[test]
    fn stepped_marker_holds_the_value() {
        let keys = vec![key(0.0, 1.0, Some(RawCurve::Stepped("stepped".into()))), key(1.0, 5.0, None)];
        let frames = read_curve_frames(&keys, &[1.0], |key| Ok(vec![key.value.unwrap_or(0.0)])).unwrap();
        assert_eq!(frames.curve_type(0), CurveType::Stepped);
        assert_eq!(frames.value_at(0.5, 0), 1.0);
    }

    #[test]
    fn bezier_values_are_scaled_but_times_are_not() {
        let mut frames = CurveFrames::new(2, 2, 2);
        let curve = RawCurve::Bezier(vec![0.25, 1.0, 0.75, 2.0, 0.1, 3.0, 0.9, 4.0]);
        let segment = CurveSegment { frame: 0, channel: 1, time1: 0.0, time2: 1.0, value1: 0.0, value2: 10.0, scale: 2.0 };
        assert_eq!(read_curve(&curve, &mut frames, 1, segment).unwrap(), 2);

        let mut expected = CurveFrames::new(2, 2, 2);
        expected.set_bezier(1, 0, 1, 0.0, 0.0, 0.1, 6.0, 0.9, 8.0, 1.0, 10.0);
        assert_eq!(frames.beziers(), expected.beziers());
    }

    #[test]
    fn bezier_needs_four_controls_per_channel() {
        let mut frames = CurveFrames::new(2, 2, 2);
        let curve = RawCurve::Bezier(vec![0.25, 0.0, 0.75, 1.0]);
        let segment = CurveSegment { frame: 0, channel: 1, time1: 0.0, time2: 1.0, value1: 0.0, value2: 1.0, scale: 1.0 };
        match read_curve(&curve, &mut frames, 0, segment) {
            Err(SkeletonError::InvalidCurve { frame: 0, channel: 1 }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn every_channel_takes_its_own_bezier() {
        let bezier = RawCurve::Bezier(vec![0.3, 0.0, 0.7, 1.0, 0.3, 0.0, 0.7, 1.0]);
        let keys = vec![
            RawCurveKeyframe { time: 0.0, x: Some(0.0), y: Some(0.0), curve: Some(bezier), ..RawCurveKeyframe::default() },
            RawCurveKeyframe { time: 2.0, x: Some(4.0), y: Some(8.0), ..RawCurveKeyframe::default() },
        ];
        let frames = read_curve_frames(&keys, &[1.0, 1.0], |key| Ok(vec![key.x.unwrap_or(0.0), key.y.unwrap_or(0.0)])).unwrap();
        assert_eq!(frames.bezier_count(), 2);
        assert_eq!(frames.curve_type(0), CurveType::Bezier(0));
        assert_eq!(frames.duration(), 2.0);
    }
}
