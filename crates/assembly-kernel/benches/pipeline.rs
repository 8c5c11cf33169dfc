use assembly_categories::CategoryLimitsCalculator;
use assembly_domain::{
    AssemblyMode, AssessmentSection, FailureMechanismSectionResult, Probability, Section,
    SectionList,
};
use assembly_kernel::{
    AssessmentSectionAssembler, CommonSectionAssembler, FailureMechanismInput,
    FailureMechanismResultAssembler, KernelConfig,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SECTIONS: usize = 250;
const MECHANISMS: usize = 15;
const LENGTH: f64 = 25_000.0;

fn assessment_section() -> AssessmentSection {
    AssessmentSection::new(LENGTH, 1.0 / 30_000.0, 1.0 / 10_000.0).unwrap()
}

/// One mechanism with `SECTIONS` sections of varying length, offset per
/// mechanism so the common refinement is much finer than any input
fn create_mechanism(index: usize) -> FailureMechanismInput {
    let name = format!("M{index}");
    let length_effect_factor = (index % 3 == 0).then_some(1.0 + index as f64);
    let interpretation = CategoryLimitsCalculator::new()
        .interpretation_categories(&assessment_section(), length_effect_factor.unwrap_or(1.0))
        .unwrap();
    let assembler = FailureMechanismResultAssembler::new();
    let mut bounds: Vec<f64> = (1..SECTIONS)
        .map(|i| {
            let base = LENGTH * i as f64 / SECTIONS as f64;
            base + ((i * 7 + index * 13) % 31) as f64
        })
        .collect();
    bounds.insert(0, 0.0);
    bounds.push(LENGTH);

    let mut results = Vec::with_capacity(SECTIONS);
    let mut sections = Vec::with_capacity(SECTIONS);
    for (i, window) in bounds.windows(2).enumerate() {
        let profile = 1e-7 * (1 + (i + index) % 50) as f64;
        let section = profile * (1.0 + (i % 4) as f64);
        results.push(
            FailureMechanismSectionResult::new(format!("{name} vak {i}"), window[1] - window[0], profile, section)
                .unwrap(),
        );
        let probability = Probability::new(section).unwrap();
        let category = assembler
            .determine_interpretation_category(probability, &interpretation)
            .unwrap();
        sections.push(Section::with_probability(window[0], window[1], probability, category).unwrap());
    }

    FailureMechanismInput::new(
        name.clone(),
        length_effect_factor,
        results,
        SectionList::new(name, sections).unwrap(),
    )
}

fn benchmark_pipeline(c: &mut Criterion) {
    let section = assessment_section();
    let mechanisms: Vec<_> = (0..MECHANISMS).map(create_mechanism).collect();

    let full = AssessmentSectionAssembler::new(KernelConfig::full()).unwrap();
    c.bench_function("pipeline_full_250x15", |b| {
        b.iter(|| full.assemble(black_box(&section), black_box(&mechanisms)).unwrap())
    });

    let merged = AssessmentSectionAssembler::new(KernelConfig {
        merge_adjacent_common_sections: true,
        ..KernelConfig::partial()
    })
    .unwrap();
    c.bench_function("pipeline_partial_merged_250x15", |b| {
        b.iter(|| merged.assemble(black_box(&section), black_box(&mechanisms)).unwrap())
    });
}

fn benchmark_common_sections(c: &mut Criterion) {
    let lists: Vec<SectionList> = (0..MECHANISMS)
        .map(|i| create_mechanism(i).sections)
        .collect();
    let assembler = CommonSectionAssembler::new();

    c.bench_function("common_sections_250x15", |b| {
        b.iter(|| {
            assembler
                .assemble(black_box(&lists), LENGTH, AssemblyMode::Full)
                .unwrap()
        })
    });
}

criterion_group!(benches, benchmark_pipeline, benchmark_common_sections);
criterion_main!(benches);
