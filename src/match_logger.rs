use crate::sim::bout::FinishKind;
use crate::sim::resolution::ExecutionGrade;
use serde_json::json;

/// Structured pipe-format record of a bout, one line per event. Meant for
/// replay tooling and post-match analysis rather than live display.
#[derive(Clone, Debug, Default)]
pub struct MatchLogger {
    format_id: String,
    log: Vec<String>,
}

impl MatchLogger {
    pub fn new() -> Self {
        Self {
            format_id: "singles".to_string(),
            log: Vec::new(),
        }
    }

    pub fn new_with_format(format_id: impl Into<String>) -> Self {
        Self {
            format_id: format_id.into(),
            log: Vec::new(),
        }
    }

    pub fn log_turn(&mut self, turn: u32) {
        self.log.push(format!("|turn|{turn}"));
    }

    pub fn log_move(&mut self, wrestler: &str, move_name: &str, success: bool, grade: ExecutionGrade) {
        let tag = if success { "hit" } else { "miss" };
        self.log
            .push(format!("|move|{wrestler}|{move_name}|{tag}|{}", grade.label()));
    }

    pub fn log_reversal(&mut self, wrestler: &str) {
        self.log.push(format!("|reversal|{wrestler}"));
    }

    pub fn log_false_finish(&mut self, wrestler: &str) {
        self.log.push(format!("|falsefinish|{wrestler}"));
    }

    pub fn log_finish(&mut self, winner: &str, kind: FinishKind) {
        self.log.push(format!("|win|{winner}|{}", kind.label()));
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "format_id": self.format_id,
            "log": self.log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_lines_use_the_pipe_format() {
        let mut logger = MatchLogger::new();
        logger.log_turn(3);
        logger.log_move("Ace Crusher", "Powerbomb", true, ExecutionGrade::Great);
        logger.log_reversal("Gran Paloma");
        logger.log_finish("Ace Crusher", FinishKind::Pinfall);
        assert_eq!(
            logger.log_lines(),
            &[
                "|turn|3".to_string(),
                "|move|Ace Crusher|Powerbomb|hit|great".to_string(),
                "|reversal|Gran Paloma".to_string(),
                "|win|Ace Crusher|pinfall".to_string(),
            ]
        );
    }

    #[test]
    fn json_export_carries_the_format_id() {
        let mut logger = MatchLogger::new_with_format("ironman");
        logger.log_turn(1);
        let value = logger.to_json();
        assert_eq!(value["format_id"], "ironman");
        assert_eq!(value["log"].as_array().unwrap().len(), 1);
    }
}
