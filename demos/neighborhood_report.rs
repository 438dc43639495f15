use anyhow::Result;
use barrio_sentiment::classifier::SentimentClassifier;
use barrio_sentiment::pipelines::sentiment_analysis_pipeline::*;
use barrio_sentiment::reports::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut repo = InMemoryRepository::new();
    seed_if_empty(&mut repo)?;

    let ratings = [
        (1, 1, 1, "Es un barrio tranquilo, se puede caminar de noche"),
        (2, 11, 5, "Roban celulares en la parada del bus"),
        (3, 6, 3, "Hay mucho ruido los fines de semana"),
        (1, 11, 4, "Muy peligroso después de las 9"),
        (2, 5, 2, "Excelente, muy agradable"),
    ];
    for (user, barrio, level, comment) in ratings {
        repo.add_rating(NewRating::new(user, barrio, level).comment(comment))?;
    }

    println!("Building pipeline...");
    let pipeline = SentimentAnalysisPipelineBuilder::beto().build()?;
    println!("Pipeline built successfully.");
    let classifier = SentimentClassifier::new(pipeline);

    println!("\n=== Map ===");
    for marker in map_view(&repo).markers {
        println!("{:<16} {:<7} {}", marker.name, marker.band.color(), marker.popup);
    }

    println!("\n=== Average danger ===");
    for bar in danger_chart(&repo) {
        println!("{:<16} {:.1}", bar.name, bar.average);
    }

    println!("\n=== Comment sentiment ===");
    for comment in repo.comments() {
        let result = classifier.classify(&comment.text)?;
        println!("{:<20} {:.2}  {}", result.label.as_str(), result.confidence, comment.text);
    }

    let report = SentimentReport::build(&classifier, &repo.comments())?;
    let dist = report.distribution();
    println!(
        "\nPositive {:.1}% | Negative {:.1}% | Neutral {:.1}%",
        dist.positive, dist.negative, dist.neutral
    );

    Ok(())
}
