use bow_vectorizer::{SearchIndex, SimpleTokenizer, TermFrequencyMode, VectorNorm, VectorizerConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("bow_vectorizer=debug".parse().expect("valid directive literal")),
        )
        .init();

    let texts = [
        "Rust is fast and memory safe.",
        "Rust has a rich type system and a helpful compiler.",
        "Python is flexible and easy to learn.",
        "The compiler checks memory safety at compile time.",
    ];

    // build index
    let config = VectorizerConfig::default()
        .with_term_freq(TermFrequencyMode::Sublinear)
        .with_norm(VectorNorm::L2);
    let index: SearchIndex = SearchIndex::build_text(&texts, &SimpleTokenizer, config)?;

    let result = index.search_text("memory safe compiler", &SimpleTokenizer, 3)?;

    // print result
    println!("Search Results: \n{}", result);
    for hit in &result {
        println!("{}", texts[hit.doc_index]);
    }
    // debug
    println!("vocabulary size: {}", index.vectorizer().vocabulary().len());
    println!("{:#?}", result);
    Ok(())
}
