// End-to-end: seed, rate, then build map, chart and sentiment reports.

use barrio_sentiment::classifier::{ModelPrediction, SentimentClassifier, TextClassifier};
use barrio_sentiment::reports::*;
use barrio_sentiment::{RecordError, SentimentError};
use chrono::{TimeZone, Utc};

struct StubModel;

impl TextClassifier for StubModel {
    fn classify(&self, text: &str) -> anyhow::Result<ModelPrediction> {
        if text.contains("falla") {
            anyhow::bail!("inference backend down");
        }
        Ok(ModelPrediction {
            label: "NEU".to_string(),
            score: 0.6,
        })
    }
}

fn seeded() -> anyhow::Result<InMemoryRepository> {
    let mut repo = InMemoryRepository::new();
    seed_if_empty(&mut repo)?;
    Ok(repo)
}

fn rate(
    repo: &mut InMemoryRepository,
    barrio: i64,
    level: i64,
    comment: &str,
    day: u32,
) -> anyhow::Result<()> {
    let form = RatingForm {
        user_id: Some("1".to_string()),
        neighborhood_id: Some(barrio.to_string()),
        danger_level: Some(level.to_string()),
        comment: Some(comment.to_string()),
    };
    let at = Utc.with_ymd_and_hms(2024, 5, day, 18, 30, 0).unwrap();
    repo.add_rating(form.parse()?.at(at))?;
    Ok(())
}

#[test]
fn map_and_chart_follow_ratings() -> anyhow::Result<()> {
    let mut repo = seeded()?;
    rate(&mut repo, 1, 1, "muy tranquilo", 1)?;
    rate(&mut repo, 1, 2, "", 2)?;
    rate(&mut repo, 11, 5, "roban mucho", 3)?;
    rate(&mut repo, 6, 3, "normal", 4)?;

    let view = map_view(&repo);
    assert_eq!(view.markers.len(), 17);
    assert_eq!(view.markers[0].popup, "El Prado: 1.5");
    assert_eq!(view.markers[0].band, DangerBand::Green);
    assert_eq!(view.markers[10].popup, "Rebolo: 5.0");
    assert_eq!(view.markers[10].band, DangerBand::Red);
    assert_eq!(view.markers[2].popup, "Villa Country: Sin datos");

    let chart = danger_chart(&repo);
    let bars: Vec<(&str, DangerBand)> = chart.iter().map(|b| (b.name.as_str(), b.band)).collect();
    assert_eq!(
        bars,
        [
            ("El Prado", DangerBand::Green),
            ("Boston", DangerBand::Orange),
            ("Rebolo", DangerBand::Red),
        ]
    );
    Ok(())
}

#[test]
fn sentiment_report_over_stored_comments() -> anyhow::Result<()> {
    let mut repo = seeded()?;
    rate(&mut repo, 1, 1, "Muy tranquilo y seguro", 1)?;
    rate(&mut repo, 2, 4, "Hubo un atraco el sábado", 2)?;
    rate(&mut repo, 3, 2, "", 3)?;
    rate(&mut repo, 4, 3, "Pocas luces en el parque", 4)?;

    let classifier = SentimentClassifier::new(StubModel);
    let report = SentimentReport::build(&classifier, &repo.comments())?;

    assert_eq!(report.total(), 3);
    assert_eq!((report.positive, report.negative, report.neutral), (1, 1, 1));
    assert_eq!(report.first_positive.as_deref(), Some("Muy tranquilo y seguro"));
    assert_eq!(report.first_negative.as_deref(), Some("Hubo un atraco el sábado"));
    assert_eq!(report.timeline.len(), 3);
    assert_eq!(
        report.timeline[2].at,
        Utc.with_ymd_and_hms(2024, 5, 4, 18, 30, 0).unwrap()
    );
    Ok(())
}

#[test]
fn sentiment_report_surfaces_model_failure() -> anyhow::Result<()> {
    let mut repo = seeded()?;
    rate(&mut repo, 1, 1, "tranquilo", 1)?;
    rate(&mut repo, 1, 3, "el alumbrado falla", 2)?;

    let classifier = SentimentClassifier::new(StubModel);
    let err = SentimentReport::build(&classifier, &repo.comments()).unwrap_err();
    assert!(matches!(err, SentimentError::ClassificationUnavailable { .. }));
    Ok(())
}

#[test]
fn rating_validation_errors() -> anyhow::Result<()> {
    let mut repo = seeded()?;

    let missing = RatingForm {
        user_id: Some("1".to_string()),
        ..Default::default()
    };
    assert_eq!(missing.parse().unwrap_err(), RecordError::MissingFields);

    let unknown_barrio = RatingForm {
        user_id: Some("1".to_string()),
        neighborhood_id: Some("99".to_string()),
        danger_level: Some("2".to_string()),
        comment: None,
    };
    let err = repo.add_rating(unknown_barrio.parse()?).unwrap_err();
    assert_eq!(
        err,
        RecordError::NotFound {
            kind: "neighborhood",
            id: 99
        }
    );
    Ok(())
}

#[test]
fn search_after_adding_neighborhood() -> anyhow::Result<()> {
    let mut repo = seeded()?;
    let form = NeighborhoodForm {
        name: Some("Barrio Abajo".to_string()),
        latitude: Some("10.9891".to_string()),
        longitude: Some("-74.7785".to_string()),
    };
    repo.add_neighborhood(form.parse()?)?;

    let names: Vec<String> = search_neighborhoods(&repo, "BARRIO")
        .into_iter()
        .map(|n| n.name)
        .collect();
    assert_eq!(names, ["Barrio Abajo"]);
    assert_eq!(search_neighborhoods(&repo, "las").len(), 2);
    Ok(())
}
