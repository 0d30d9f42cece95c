use crate::output::print_json;
use personalize_core::detect;

pub fn run(title: &str, items: Option<usize>, json: bool) -> anyhow::Result<()> {
    let detection = detect::resolve(title, items)?;
    if json {
        print_json(&serde_json::json!({
            "title": title,
            "count": detection.count,
            "source": detection.source,
        }))?;
    } else {
        println!("{} (source: {})", detection.count, detection.source);
    }
    Ok(())
}
