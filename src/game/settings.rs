use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Settings {
    pub question_duration: Duration,
    pub reveal_delay: Duration,
    pub countdown_announcement: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            question_duration: Duration::from_secs(15),
            reveal_delay: Duration::from_millis(600),
            countdown_announcement: Duration::from_secs(5),
        }
    }
}
