use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jmm_compiler::ast::{BinaryOperator, Node};
use jmm_compiler::ir::{AccessModifier, IrClass, IrField, IrMethod, Param, VarTable};
use jmm_compiler::{compile, CodegenOptions, Lowerer, SymbolTable, TempGenerator, Type};

/// `acc = acc + i * 2;` repeated `statements` times, then `return acc;`
fn build_class(methods: usize, statements: usize) -> IrClass {
    let symbols = SymbolTable::new("Bench");
    let mut class = IrClass::new("Bench");
    class.add_field(IrField::new("total", Type::Int32).with_access(AccessModifier::Public));

    for m in 0..methods {
        let mut body = Vec::with_capacity(statements + 1);
        for _ in 0..statements {
            let step = Node::binary(
                BinaryOperator::Multiply,
                Node::var("i", Type::Int32),
                Node::int(2),
                Type::Int32,
            );
            let sum = Node::binary(
                BinaryOperator::Add,
                Node::var("acc", Type::Int32),
                step,
                Type::Int32,
            );
            body.push(Node::assign("acc", Type::Int32, sum));
        }
        body.push(Node::ret(Some(Node::var("acc", Type::Int32)), Type::Int32));

        let mut lowerer = Lowerer::with_temps(&symbols, TempGenerator::with_reserved(["acc", "i"]));
        let instrs = lowerer.lower_body(&body).unwrap();

        let params = vec![Param::new("i", Type::Int32)];
        let temps: Vec<String> = (0..statements * 2).map(|t| format!("tmp{}", t)).collect();
        let locals = std::iter::once(("acc", Type::Int32))
            .chain(temps.iter().map(|name| (name.as_str(), Type::Int32)));
        let table = VarTable::for_method(false, &params, locals);

        let mut method = IrMethod::new(format!("step{}", m), params, Type::Int32)
            .with_access(AccessModifier::Public)
            .with_var_table(table);
        method.extend_instrs(instrs);
        class.add_method(method);
    }
    class
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for (methods, statements) in [(1, 10), (10, 10), (10, 100)] {
        let class = build_class(methods, statements);
        for (label, options) in [
            ("fixed", CodegenOptions::default()),
            ("computed", CodegenOptions::computed_limits()),
        ] {
            group.bench_with_input(
                BenchmarkId::new(label, format!("{}x{}", methods, statements)),
                &class,
                |b, class| {
                    b.iter(|| compile(black_box(class), &options).unwrap());
                },
            );
        }
    }

    group.finish();
}

fn bench_lower(c: &mut Criterion) {
    let symbols = SymbolTable::new("Bench");
    let mut expr = Node::int(0);
    for i in 1..200 {
        expr = Node::binary(BinaryOperator::Add, expr, Node::int(i), Type::Int32);
    }

    c.bench_function("lower_sum_chain", |b| {
        b.iter(|| {
            let mut lowerer = Lowerer::new(&symbols);
            lowerer.lower(black_box(&expr)).unwrap()
        });
    });
}

criterion_group!(benches, bench_generate, bench_lower);
criterion_main!(benches);
