use super::blocks::kinds::{CodeFence, MathBlock, code_fence::FenceKind};

/// Splits `text` into chunks of roughly `chunk_size` characters.
///
/// Cuts only happen directly after a blank line that is not inside a fenced
/// code block or a `$$` math block, so no block is ever split across two
/// chunks. A document without such boundaries stays one chunk.
/// Concatenating the chunks yields `text` again.
pub fn split_chunks(text: &str, chunk_size: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut chunk_start = 0;
    let mut offset = 0;
    let mut chars = 0;
    let mut fence: Option<FenceKind> = None;
    let mut in_math = false;

    for line in text.split_inclusive('\n') {
        offset += line.len();
        chars += line.chars().count();

        match fence {
            Some(kind) if CodeFence::closes(kind, line) => fence = None,
            Some(_) => continue,
            None if MathBlock::opens(line) => in_math = !in_math,
            None if in_math => continue,
            None => fence = CodeFence::sig(line),
        }

        if fence.is_none() && !in_math && line.trim().is_empty() && chars >= chunk_size {
            chunks.push(&text[chunk_start..offset]);
            chunk_start = offset;
            chars = 0;
        }
    }

    if chunk_start < text.len() {
        chunks.push(&text[chunk_start..]);
    }
    chunks
}
