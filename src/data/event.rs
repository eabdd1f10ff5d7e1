#[derive(Clone, Debug, PartialEq)]
pub struct EventData {
    pub name: String,
    pub int_value: i32,
    pub float_value: f32,
    pub string_value: String,
    pub audio_path: Option<String>,
    pub volume: f32,
    pub balance: f32,
}

impl EventData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            int_value: 0,
            float_value: 0.0,
            string_value: String::new(),
            audio_path: None,
            volume: 1.0,
            balance: 0.0,
        }
    }
}

/// An event fired by an event timeline, starting from its data's defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub time: f32,
    /// Index into the skeleton's events.
    pub data: usize,
    pub int_value: i32,
    pub float_value: f32,
    pub string_value: String,
    pub volume: f32,
    pub balance: f32,
}

impl Event {
    pub fn new(time: f32, index: usize, data: &EventData) -> Self {
        Self {
            time,
            data: index,
            int_value: data.int_value,
            float_value: data.float_value,
            string_value: data.string_value.clone(),
            volume: data.volume,
            balance: data.balance,
        }
    }
}
