//! Keyframe storage shared by every continuous-valued timeline.
//!
//! Frames are stored flat: each row is a time followed by one value per channel.
//! Every frame carries a [`CurveType`] describing how its values move toward
//! the next frame. Bezier segments are pre-sampled into [`BEZIER_SIZE`] floats
//! (nine x/y points) so a consumer can interpolate piecewise linearly.

/// Floats stored per sampled bezier segment.
pub const BEZIER_SIZE: usize = 18;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CurveType {
    Linear,
    Stepped,
    /// Start of the frame's first channel segment in the bezier table. The
    /// segment for channel `c` begins at `start + c * BEZIER_SIZE`.
    Bezier(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CurveFrames {
    channels: usize,
    frames: Vec<f32>,
    curves: Vec<CurveType>,
    beziers: Vec<f32>,
}

impl CurveFrames {
    /// `bezier_count` is an upper bound on the segments that will be set;
    /// [`CurveFrames::shrink`] trims the table to the number actually used.
    pub fn new(frame_count: usize, channels: usize, bezier_count: usize) -> Self {
        let mut curves = vec![CurveType::Linear; frame_count];
        if let Some(last) = curves.last_mut() {
            *last = CurveType::Stepped;
        }
        Self {
            channels,
            frames: vec![0.0; frame_count * (channels + 1)],
            curves,
            beziers: vec![0.0; bezier_count * BEZIER_SIZE],
        }
    }

    fn entries(&self) -> usize {
        self.channels + 1
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn frame_count(&self) -> usize {
        self.curves.len()
    }

    pub fn bezier_count(&self) -> usize {
        self.beziers.len() / BEZIER_SIZE
    }

    pub fn time(&self, frame: usize) -> f32 {
        self.frames[frame * self.entries()]
    }

    pub fn value(&self, frame: usize, channel: usize) -> f32 {
        self.frames[frame * self.entries() + 1 + channel]
    }

    pub fn curve_type(&self, frame: usize) -> CurveType {
        self.curves[frame]
    }

    pub fn beziers(&self) -> &[f32] {
        &self.beziers
    }

    /// Time of the last frame.
    pub fn duration(&self) -> f32 {
        match self.frame_count() {
            0 => 0.0,
            count => self.time(count - 1),
        }
    }

    pub fn set_frame(&mut self, frame: usize, time: f32, values: &[f32]) {
        debug_assert_eq!(values.len(), self.channels);
        let start = frame * self.entries();
        self.frames[start] = time;
        self.frames[start + 1..start + 1 + values.len()].copy_from_slice(values);
    }

    pub fn set_stepped(&mut self, frame: usize) {
        self.curves[frame] = CurveType::Stepped;
    }

    /// Samples the cubic bezier `(time1, value1) (cx1, cy1) (cx2, cy2) (time2, value2)`
    /// into segment `bezier` using forward differencing.
    pub fn set_bezier(
        &mut self,
        bezier: usize,
        frame: usize,
        channel: usize,
        time1: f32,
        value1: f32,
        cx1: f32,
        cy1: f32,
        cx2: f32,
        cy2: f32,
        time2: f32,
        value2: f32,
    ) {
        let start = bezier * BEZIER_SIZE;
        if self.beziers.len() < start + BEZIER_SIZE {
            self.beziers.resize(start + BEZIER_SIZE, 0.0);
        }
        if channel == 0 {
            self.curves[frame] = CurveType::Bezier(start);
        }
        let tmpx = (time1 - cx1 * 2.0 + cx2) * 0.03;
        let tmpy = (value1 - cy1 * 2.0 + cy2) * 0.03;
        let dddx = ((cx1 - cx2) * 3.0 - time1 + time2) * 0.006;
        let dddy = ((cy1 - cy2) * 3.0 - value1 + value2) * 0.006;
        let mut ddx = tmpx * 2.0 + dddx;
        let mut ddy = tmpy * 2.0 + dddy;
        let mut dx = (cx1 - time1) * 0.3 + tmpx + dddx * 0.166_666_67;
        let mut dy = (cy1 - value1) * 0.3 + tmpy + dddy * 0.166_666_67;
        let mut x = time1 + dx;
        let mut y = value1 + dy;
        for point in self.beziers[start..start + BEZIER_SIZE].chunks_exact_mut(2) {
            point[0] = x;
            point[1] = y;
            dx += ddx;
            dy += ddy;
            ddx += dddx;
            ddy += dddy;
            x += dx;
            y += dy;
        }
    }

    /// Drops bezier storage beyond the first `bezier_count` segments.
    pub fn shrink(&mut self, bezier_count: usize) {
        self.beziers.truncate(bezier_count * BEZIER_SIZE);
        self.beziers.shrink_to_fit();
    }

    /// Index of the frame whose segment contains `time`.
    fn search(&self, time: f32) -> usize {
        let count = self.frame_count();
        (1..count)
            .find(|&frame| self.time(frame) > time)
            .map_or(count - 1, |next| next - 1)
    }

    /// Value of `channel` at `time`. Before the first frame the first value
    /// is held, after the last frame the last value.
    pub fn value_at(&self, time: f32, channel: usize) -> f32 {
        if self.frame_count() == 0 {
            return 0.0;
        }
        if time < self.time(0) {
            return self.value(0, channel);
        }
        let frame = self.search(time);
        match self.curves[frame] {
            CurveType::Stepped => self.value(frame, channel),
            CurveType::Linear => {
                let (before, value) = (self.time(frame), self.value(frame, channel));
                let (after, next) = (self.time(frame + 1), self.value(frame + 1, channel));
                value + (time - before) / (after - before) * (next - value)
            }
            CurveType::Bezier(start) => {
                self.bezier_value(time, frame, channel, start + channel * BEZIER_SIZE)
            }
        }
    }

    /// Eased progress between frame `frame` and the next, for timelines
    /// without value channels whose curve runs from 0 to 1.
    pub fn percent_at(&self, time: f32, frame: usize) -> f32 {
        match self.curves[frame] {
            CurveType::Stepped => 0.0,
            CurveType::Linear => {
                let before = self.time(frame);
                (time - before) / (self.time(frame + 1) - before)
            }
            CurveType::Bezier(start) => {
                let samples = &self.beziers[start..start + BEZIER_SIZE];
                if samples[0] > time {
                    let before = self.time(frame);
                    return samples[1] * (time - before) / (samples[0] - before);
                }
                for i in (2..BEZIER_SIZE).step_by(2) {
                    if samples[i] >= time {
                        let (x, y) = (samples[i - 2], samples[i - 1]);
                        return y + (time - x) / (samples[i] - x) * (samples[i + 1] - y);
                    }
                }
                let (x, y) = (samples[BEZIER_SIZE - 2], samples[BEZIER_SIZE - 1]);
                y + (1.0 - y) * (time - x) / (self.time(frame + 1) - x)
            }
        }
    }

    fn bezier_value(&self, time: f32, frame: usize, channel: usize, start: usize) -> f32 {
        let samples = &self.beziers[start..start + BEZIER_SIZE];
        if samples[0] > time {
            let (x, y) = (self.time(frame), self.value(frame, channel));
            return y + (time - x) / (samples[0] - x) * (samples[1] - y);
        }
        for i in (2..BEZIER_SIZE).step_by(2) {
            if samples[i] >= time {
                let (x, y) = (samples[i - 2], samples[i - 1]);
                return y + (time - x) / (samples[i] - x) * (samples[i + 1] - y);
            }
        }
        let (x, y) = (samples[BEZIER_SIZE - 2], samples[BEZIER_SIZE - 1]);
        let (end_x, end_y) = (self.time(frame + 1), self.value(frame + 1, channel));
        y + (time - x) / (end_x - x) * (end_y - y)
    }
}
