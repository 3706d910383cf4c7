use covey::Pipeline;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Minimal end-to-end: tokenized documents -> TF-IDF -> dendrogram ->
    // model selection -> mixture refinement.
    //
    // Two obvious topics, three documents each.
    let raw = [
        "rust compiler borrow checker compiler",
        "borrow checker rust lifetimes",
        "rust compiler lifetimes",
        "pasta sauce tomato basil",
        "tomato basil pasta oven",
        "sauce oven pasta tomato",
    ];
    let docs: Vec<Vec<&str>> = raw.iter().map(|d| d.split_whitespace().collect()).collect();

    let outcome = Pipeline::new().run(&docs)?;

    println!(
        "dictionary={} docs={}",
        outcome.space.n_terms(),
        outcome.space.n_docs()
    );
    println!("merges:");
    for merge in outcome.dendrogram.merges() {
        println!("  {} <- {}", merge.to, merge.from);
    }
    println!("selected model score={:.4}", outcome.score);
    for (comp, members) in outcome.partition.iter().enumerate() {
        if members.is_empty() {
            continue;
        }
        println!("component {comp}: {members:?}");
    }

    Ok(())
}
