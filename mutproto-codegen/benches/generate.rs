//! Generation benchmarks.

use criterion::{Criterion, criterion_group, criterion_main};
use mutproto_codegen::{Generator, GeneratorConfig};
use mutproto_schema::{EnumDef, EnumValueDef, FieldDef, FieldType, MessageDef, OneOfDef, SchemaIr};
use std::hint::black_box;

fn sample_schema(messages: usize) -> SchemaIr {
    let mut ir = SchemaIr::new("bench");

    let mut status = EnumDef::new("Status");
    status.add_value(EnumValueDef::new("STATUS_UNKNOWN", 0));
    status.add_value(EnumValueDef::new("STATUS_ACTIVE", 1));
    ir.add_enum(status);

    for i in 0..messages {
        let mut msg = MessageDef::new(format!("Record{i}"));
        msg.add_field(FieldDef::new("id", FieldType::named("int64"), 1));
        msg.add_field(FieldDef::new("name", FieldType::named("string"), 2));
        msg.add_field(FieldDef::new("status", FieldType::named("Status"), 3));
        msg.add_field(FieldDef::new("scores", FieldType::repeated("float"), 4));
        msg.add_field(FieldDef::new("tags", FieldType::map("string", "int32"), 5));
        if i > 0 {
            let parent = format!("Record{}", i - 1);
            msg.add_field(FieldDef::new("parent", FieldType::optional(parent.clone()), 6));
            msg.add_field(FieldDef::new("siblings", FieldType::repeated(parent), 7));
        }
        let mut payload = OneOfDef::new("payload");
        payload.add_field(FieldDef::new("text", FieldType::named("string"), 8));
        payload.add_field(FieldDef::new("count", FieldType::named("int32"), 9));
        msg.add_one_of(payload);
        ir.add_message(msg);
    }
    ir
}

fn benchmark_generate(c: &mut Criterion) {
    let ir = sample_schema(50);
    let config = GeneratorConfig::default();
    let compact = GeneratorConfig::default().compact_collection_mode(true);

    c.bench_function("generate_50_messages", |b| {
        b.iter(|| {
            let generator = Generator::new(black_box(&ir), &config).expect("generator");
            generator.generate().expect("generate")
        })
    });

    c.bench_function("generate_50_messages_compact", |b| {
        b.iter(|| {
            let generator = Generator::new(black_box(&ir), &compact).expect("generator");
            generator.generate().expect("generate")
        })
    });
}

fn benchmark_symbol_table(c: &mut Criterion) {
    let ir = sample_schema(200);

    c.bench_function("symbol_table_200_messages", |b| {
        b.iter(|| mutproto_schema::SymbolTable::build(black_box(&ir)).expect("symbols"))
    });
}

criterion_group!(benches, benchmark_generate, benchmark_symbol_table);
criterion_main!(benches);
