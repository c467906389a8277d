use patent_rank::{Document, RelevanceScorer, SearchEngine, SearchOptions, STRICT_MIN_SIMILARITY};

fn main() -> anyhow::Result<()> {
    println!("=== patent-rank Basic Usage Example ===\n");

    let docs = vec![
        Document::new(
            "10-2019-0100001".to_string(),
            "전기자동차용 배터리 냉각 장치".to_string(),
            "전기자동차 배터리 모듈의 냉각 효율을 높이는 냉각 장치".to_string(),
        )
        .with_full_text("본 발명은 전기자동차 배터리 모듈 사이에 냉각 유로를 형성하는 장치에 관한 것이다.".to_string()),
        Document::new(
            "10-2019-0100002".to_string(),
            "Solid-state battery electrolyte".to_string(),
            "A sulfide electrolyte for solid-state battery cells".to_string(),
        ),
        Document::new(
            "10-2019-0100003".to_string(),
            "차량용 변속기".to_string(),
            "자동차 변속기의 기어 배열".to_string(),
        ),
    ];

    let engine = SearchEngine::in_memory(docs.clone());

    // Example 1: default threshold
    println!("--- Example 1: Search for '전기자동차 배터리' ---");
    let results = engine.search("전기자동차 배터리", &SearchOptions::default())?;
    println!("Found {} documents", results.total);
    for (i, (doc, score)) in results.documents.iter().zip(&results.scores).enumerate() {
        println!("{}. [{:.1}%] {} {}", i + 1, score, doc.app_no, doc.title);
    }

    // Example 2: strict threshold
    println!("\n--- Example 2: Strict threshold for 'battery' ---");
    let options = SearchOptions {
        min_similarity: STRICT_MIN_SIMILARITY,
        ..Default::default()
    };
    let results = engine.search("battery", &options)?;
    println!(
        "{} of {} scored documents (>0: {}) passed {:.0}",
        results.stats.passing, results.stats.total_scored, results.stats.nonzero, STRICT_MIN_SIMILARITY
    );

    // Example 3: score breakdown for one document
    println!("\n--- Example 3: Score breakdown ---");
    let scorer = RelevanceScorer::new();
    let tokens = scorer.tokenizer().tokenize("전기자동차 배터리 냉각");
    let breakdown = scorer.explain(&tokens, &docs[0]);
    println!("{:#?}", breakdown);

    println!("\n=== Example Complete ===");

    Ok(())
}
