use alb::config::ProjectConfig;
use alb::harness::parse_header;
use alb::package::ArtifactIndex;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::path::{Path, PathBuf};

const MOCK_CONFIG: &str = r#"
[managed]
source_dir = "src/java"
compiler = "javac"

[bundle]
name = "alco.jar"
entry_roots = ["me", "com"]

[test]
compiler = ["./alco", "-path=runtime-64:Doxyfile", "test/helpers.o"]
"#;

const MOCK_FIXTURE: &str = r#"// NAME Arithmetic and printing
// COMPILE ["-o", "test/arith"]
// DELETE test/arith
// DELETE test/arith.o
// RUN test/arith
// POUT 1
// POUT 2
// POUT 3
// PEXIT 0

func main () -> int {
    return 0
}
"#;

fn bench_config_parse(c: &mut Criterion) {
    c.bench_function("parse_alco_toml", |b| {
        b.iter(|| {
            let _: ProjectConfig = toml::from_str(black_box(MOCK_CONFIG)).unwrap();
        })
    });
}

fn bench_header_parse(c: &mut Criterion) {
    let path = Path::new("test/arith.al");
    c.bench_function("parse_fixture_header", |b| {
        b.iter(|| parse_header(black_box(path), black_box(MOCK_FIXTURE)).unwrap())
    });
}

fn bench_index_collect(c: &mut Criterion) {
    // Setup a temp tree of class files to index
    let temp_dir = std::env::temp_dir().join("alb_bench_index");
    let roots: Vec<PathBuf> = ["src", "dep.jar.d"].iter().map(|r| temp_dir.join(r)).collect();
    if !temp_dir.exists() {
        for (i, root) in roots.iter().enumerate() {
            let pkg = root.join(format!("pkg{i}"));
            std::fs::create_dir_all(&pkg).unwrap();
            for n in 0..100 {
                std::fs::write(pkg.join(format!("C{n}.class")), "").unwrap();
            }
        }
    }

    c.bench_function("collect_artifact_index", |b| {
        b.iter(|| ArtifactIndex::collect(black_box(&roots), ".class").unwrap())
    });
}

criterion_group!(
    benches,
    bench_config_parse,
    bench_header_parse,
    bench_index_collect
);
criterion_main!(benches);
