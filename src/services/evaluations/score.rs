//! 评估评分
//!
//! 总分 = (传统四项均值 + 细化四项均值) / 2，两组各占一半权重。

use serde_json::Value;

use crate::errors::{Result, SchoolError};
use crate::models::evaluations::entities::{Evaluation, EvaluationScores};

/// 缺省或无法解析时的评分
pub const DEFAULT_SCORE: i32 = 7;
pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 10;

/// 解析单项评分
///
/// 接受整数或数字字符串；缺省、null、非整数或无法解析的值按默认分处理，
/// 能解析但不在 1..=10 内时报错。
pub fn parse_score(field: &str, value: Option<&Value>) -> Result<i32> {
    let parsed = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match parsed {
        None => Ok(DEFAULT_SCORE),
        Some(score) if (MIN_SCORE as i64..=MAX_SCORE as i64).contains(&score) => Ok(score as i32),
        Some(_) => Err(SchoolError::invalid_input(format!(
            "{field} must be between {MIN_SCORE} and {MAX_SCORE}"
        ))),
    }
}

fn mean(values: [i32; 4]) -> f64 {
    values.iter().map(|v| f64::from(*v)).sum::<f64>() / values.len() as f64
}

/// 计算总分
pub fn compute_overall_score(scores: &EvaluationScores) -> f64 {
    let legacy = mean([
        scores.teaching_quality,
        scores.punctuality,
        scores.student_interaction,
        scores.curriculum_adherence,
    ]);
    let detailed = mean([
        scores.lesson_planning,
        scores.lesson_execution,
        scores.classroom_management,
        scores.professional_growth,
    ]);
    (legacy + detailed) / 2.0
}

/// 一组评估的各项平均分
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreAverages {
    pub count: usize,
    pub teaching_quality: f64,
    pub punctuality: f64,
    pub student_interaction: f64,
    pub curriculum_adherence: f64,
    pub overall: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 按项求平均，保留两位小数；没有评估时全部为 0
pub fn average_scores(evaluations: &[Evaluation]) -> ScoreAverages {
    if evaluations.is_empty() {
        return ScoreAverages::default();
    }
    let n = evaluations.len() as f64;
    let avg = |f: fn(&Evaluation) -> f64| round2(evaluations.iter().map(f).sum::<f64>() / n);

    ScoreAverages {
        count: evaluations.len(),
        teaching_quality: avg(|e| f64::from(e.scores.teaching_quality)),
        punctuality: avg(|e| f64::from(e.scores.punctuality)),
        student_interaction: avg(|e| f64::from(e.scores.student_interaction)),
        curriculum_adherence: avg(|e| f64::from(e.scores.curriculum_adherence)),
        overall: avg(|e| e.overall_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn scores(legacy: [i32; 4], detailed: [i32; 4]) -> EvaluationScores {
        EvaluationScores {
            teaching_quality: legacy[0],
            punctuality: legacy[1],
            student_interaction: legacy[2],
            curriculum_adherence: legacy[3],
            lesson_planning: detailed[0],
            lesson_execution: detailed[1],
            classroom_management: detailed[2],
            professional_growth: detailed[3],
        }
    }

    #[test]
    fn test_average_of_averages() {
        let overall = compute_overall_score(&scores([8, 6, 10, 8], [7, 7, 7, 7]));
        assert!((overall - 7.5).abs() < 1e-9);

        // 与八项平均不同
        let overall = compute_overall_score(&scores([10, 10, 10, 10], [1, 1, 1, 1]));
        assert!((overall - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_score_inputs() {
        assert_eq!(parse_score("punctuality", Some(&json!(9))).unwrap(), 9);
        assert_eq!(parse_score("punctuality", Some(&json!(" 4 "))).unwrap(), 4);
        assert_eq!(parse_score("punctuality", Some(&json!(6.0))).unwrap(), 6);
        assert_eq!(parse_score("punctuality", None).unwrap(), DEFAULT_SCORE);
        assert_eq!(
            parse_score("punctuality", Some(&json!(null))).unwrap(),
            DEFAULT_SCORE
        );
        assert_eq!(
            parse_score("punctuality", Some(&json!("abc"))).unwrap(),
            DEFAULT_SCORE
        );
        assert_eq!(
            parse_score("punctuality", Some(&json!(6.5))).unwrap(),
            DEFAULT_SCORE
        );
        let err = parse_score("punctuality", Some(&json!(11))).unwrap_err();
        assert!(err.message().contains("punctuality"));
        assert!(parse_score("punctuality", Some(&json!("0"))).is_err());
    }

    proptest! {
        #[test]
        fn overall_stays_within_bounds(
            legacy in proptest::array::uniform4(1i32..=10),
            detailed in proptest::array::uniform4(1i32..=10),
        ) {
            let overall = compute_overall_score(&scores(legacy, detailed));
            prop_assert!((1.0..=10.0).contains(&overall));
            let expected = (legacy.iter().sum::<i32>() as f64 / 4.0
                + detailed.iter().sum::<i32>() as f64 / 4.0) / 2.0;
            prop_assert!((overall - expected).abs() < 1e-9);
        }
    }
}
