use criterion::{Criterion, criterion_group, criterion_main};
use mind_builder::config::properties;
use mind_builder::config::{MapSource, Settings};
use mind_builder::pipeline::Pipeline;
use std::hint::black_box;

const MOCK_PROPERTIES: &str = r#"
# Release configuration
configuration = Release
executableComponent = helloworld.Application
binaryName = hello
outputDirectory = build
sourcePath = src/main/mind:src/generated/mind
includePath = include
compilerCommand = arm-none-eabi-gcc
cFlags = -O2 -Wall \
         -ffunction-sections
ldFlags = -Wl,--gc-sections
message = café
"#;

fn bench_parse_properties(c: &mut Criterion) {
    c.bench_function("parse_properties", |b| {
        b.iter(|| properties::parse(black_box(MOCK_PROPERTIES)))
    });
}

fn bench_resolve_settings(c: &mut Criterion) {
    let source = MapSource::from(properties::parse(MOCK_PROPERTIES).unwrap());
    c.bench_function("resolve_settings", |b| {
        b.iter(|| Settings::resolve(black_box(&source)))
    });
}

fn bench_pipeline_arguments(c: &mut Criterion) {
    let source = MapSource::from(properties::parse(MOCK_PROPERTIES).unwrap());
    let settings = Settings::resolve(&source);
    let mut group = c.benchmark_group("pipeline_arguments");
    for (name, pipeline) in [
        ("build", Pipeline::BUILD),
        ("test", Pipeline::TEST),
        ("draw", Pipeline::DRAW),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| pipeline.arguments(black_box(&settings)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse_properties,
    bench_resolve_settings,
    bench_pipeline_arguments
);
criterion_main!(benches);
