// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with some content.\n\n- Bullet point\n    - Nested item\n- Another item\n\n- [ ] open task\n- [x] done task\n\n| Col | Val |\n|:---|---:|\n| a | 1 |\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_task_document(tasks: usize) -> String {
    let mut content = String::from("# Tasks\n\n");
    for i in 0..tasks {
        let indent = "    ".repeat(i % 3);
        let state = if i % 2 == 0 { ' ' } else { 'x' };
        content.push_str(&format!("{indent}- [{state}] task number {i}\n"));
    }
    content
}
