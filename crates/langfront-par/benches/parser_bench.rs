//! Parser throughput benchmarks.
//!
//! `cargo bench --package langfront-par`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use langfront_lex::{Lexer, TokenStream};
use langfront_par::{Parser, ParserMode};
use langfront_util::Handler;

fn parse_source(source: &str) -> langfront_par::ParseResult {
    let handler = Handler::new();
    let file = langfront_lex::FileRef::new(0, "<bench>", source.as_bytes());
    let stream = langfront_lex::Utf8Stream::init(file).expect("valid utf8");
    let mut lexer = Lexer::new(file, stream, &handler);
    let tokens = lexer.tokenize();
    let token_stream = TokenStream::new(tokens, "<bench>");
    let parser = Parser::new(token_stream, source.as_bytes(), &handler, ParserMode::Recovery);
    parser.parse_all()
}

fn bench_parser_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_simple");

    let source = "x := 42;";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("declare_statement", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_functions");

    let source = r#"
        fn main() {
            x := 42;
            y := x + 1;
            ret y;
        }

        fn fib(n: i32) -> i32 {
            if n <= 1 {
                ret n;
            }
            ret fib(n - 1) + fib(n - 2);
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("functions", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_structs(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_structs");

    let source = r#"
        struct Point {
            x: i32,
            y: i32,
        }

        struct Rectangle {
            origin: Point,
            width: i32,
            height: i32,
        }

        impl Point {
            fn new(x: i32, y: i32) -> Point {
                ret Point { x: x, y: y };
            }

            fn distance_to(this: Point, other: Point) -> i32 {
                dx := this.x - other.x;
                dy := this.y - other.y;
                ret dx * dx + dy * dy;
            }
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("structs_impls", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_enums(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_enums");

    let source = r#"
        enum Color {
            Red,
            Green,
            Blue,
            Custom(i32, i32, i32),
        }

        enum Maybe {
            Some(i32),
            None,
        }

        enum Outcome {
            Ok(i32),
            Err(i32),
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("enums", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_control_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_control_flow");

    let source = r#"
        fn process(n: i32) -> i32 {
            if n < 0 {
                ret -1;
            } else if n == 0 {
                ret 0;
            } else {
                match n {
                    1 : ret 1,
                    2 : ret 2,
                    _ : {
                        mut sum = 0;
                        mut i = 0;
                        while i < n {
                            sum += i;
                            i += 1;
                        }
                        ret sum;
                    }
                }
            }
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("control_flow", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_complex");

    let source = r#"
        trait Drawable {
            fn draw(obj: Point);
            fn bounding_box(obj: Point) -> Rectangle;
        }

        struct Point {
            x: i32,
            y: i32,
        }

        struct Rectangle {
            x: i32,
            y: i32,
            width: i32,
            height: i32,
        }

        impl Point {
            fn new(x: i32, y: i32) -> Point {
                ret Point { x: x, y: y };
            }
        }

        impl Rectangle {
            fn new(x: i32, y: i32, w: i32, h: i32) -> Rectangle {
                ret Rectangle { x: x, y: y, width: w, height: h };
            }
        }

        impl Drawable for Point {
            fn draw(obj: Point) {
                obj.x;
            }

            fn bounding_box(obj: Point) -> Rectangle {
                ret Rectangle::new(obj.x, obj.y, 1, 1);
            }
        }

        fn main() {
            p := Point::new(10, 20);
            p.draw();

            shapes := [];
            shapes.push(p);
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("complex_source", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

criterion_group!(
    benches,
    bench_parser_simple,
    bench_parser_functions,
    bench_parser_structs,
    bench_parser_enums,
    bench_parser_control_flow,
    bench_parser_complex
);
criterion_main!(benches);
