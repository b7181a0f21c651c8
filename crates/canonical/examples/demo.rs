use canonical::{normalize_document, NameMapping, NormalizationConfig, NormalizedDocument};

fn main() {
    let tsql = "-- nightly extract\nSELECT TOP 10 [OrderId], [Total]\nFROM dbo.[Orders] WITH (NOLOCK);";

    let mapping = NameMapping::parse("dbo. -> PUBLIC.").expect("mapping parses");
    let cfg = NormalizationConfig::default();

    let doc: NormalizedDocument =
        normalize_document(Some("extract.sql"), tsql, &cfg, &mapping).expect("valid config");
    println!("canonical: {}", doc.canonical_text);
    println!();
    println!("sha256: {}", doc.sha256_hex);
}
