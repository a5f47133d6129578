//! Markdown parsing for the report renderer.
//!
//! pulldown-cmark events are folded into a flat block tree the panels
//! can draw; the table extension is enabled. Parsing is pure and
//! best-effort: empty input yields no blocks, malformed input yields
//! whatever blocks survive, and nothing panics.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// An inline text run with its resolved style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub strong: bool,
    pub emphasis: bool,
    pub code: bool,
    pub strikethrough: bool,
}

/// One drawable block of the rendered document.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    Paragraph(Vec<Span>),
    CodeBlock { language: String, code: String },
    List { ordered: bool, items: Vec<Vec<Span>> },
    Table { header: Vec<Vec<Span>>, rows: Vec<Vec<Vec<Span>>> },
    Rule,
}

/// Parse markdown into drawable blocks.
pub fn parse_markdown(source: &str) -> Vec<Block> {
    if source.trim().is_empty() {
        return Vec::new();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut builder = BlockBuilder::default();
    for event in Parser::new_ext(source, options) {
        builder.handle(event);
    }
    builder.finish()
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    spans: Vec<Span>,
    strong: u32,
    emphasis: u32,
    strikethrough: u32,
    heading: Option<u8>,
    code_block: Option<CodeAccum>,
    list: Option<ListAccum>,
    table: Option<TableAccum>,
}

#[derive(Default)]
struct CodeAccum {
    language: String,
    code: String,
}

#[derive(Default)]
struct ListAccum {
    ordered: bool,
    /// Nesting depth; inner lists flatten into the outer one.
    depth: u32,
    items: Vec<Vec<Span>>,
}

#[derive(Default)]
struct TableAccum {
    header: Vec<Vec<Span>>,
    rows: Vec<Vec<Vec<Span>>>,
    row: Vec<Vec<Span>>,
}

impl BlockBuilder {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => self.push_code_span(&code),
            Event::SoftBreak | Event::HardBreak => self.push_separator(),
            Event::Rule => {
                self.flush_paragraph();
                self.blocks.push(Block::Rule);
            }
            // raw HTML, footnotes, task markers: dropped, text-only render
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush_paragraph();
                self.heading = Some(heading_rank(level));
            }
            Tag::CodeBlock(kind) => {
                self.flush_paragraph();
                let language = match kind {
                    CodeBlockKind::Fenced(lang) => lang.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code_block = Some(CodeAccum {
                    language,
                    code: String::new(),
                });
            }
            Tag::Item => {
                // close out any text accumulated before a nested list
                if self.list.is_some() {
                    let spans = self.take_spans();
                    if let Some(list) = &mut self.list {
                        if !spans.is_empty() {
                            list.items.push(spans);
                        }
                    }
                }
            }
            Tag::List(start) => {
                if let Some(list) = &mut self.list {
                    list.depth += 1;
                } else {
                    self.flush_paragraph();
                    self.list = Some(ListAccum {
                        ordered: start.is_some(),
                        depth: 0,
                        items: Vec::new(),
                    });
                }
            }
            Tag::Table(_) => {
                self.flush_paragraph();
                self.table = Some(TableAccum::default());
            }
            Tag::Emphasis => self.emphasis += 1,
            Tag::Strong => self.strong += 1,
            Tag::Strikethrough => self.strikethrough += 1,
            // links and images contribute their text only
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                let spans = self.take_spans();
                if let Some(level) = self.heading.take() {
                    if !spans.is_empty() {
                        self.blocks.push(Block::Heading { level, spans });
                    }
                }
            }
            TagEnd::Paragraph => {
                if self.list.is_some() || self.table.is_some() {
                    // paragraph inside an item or cell: keep accumulating
                    self.push_separator();
                } else {
                    self.flush_paragraph();
                }
            }
            TagEnd::CodeBlock => {
                if let Some(accum) = self.code_block.take() {
                    self.blocks.push(Block::CodeBlock {
                        language: accum.language,
                        code: accum.code.trim_end_matches('\n').to_string(),
                    });
                }
            }
            TagEnd::Item => {
                let spans = self.take_spans();
                if let Some(list) = &mut self.list {
                    if !spans.is_empty() {
                        list.items.push(spans);
                    }
                }
            }
            TagEnd::List(_) => {
                if let Some(list) = &mut self.list {
                    if list.depth > 0 {
                        list.depth -= 1;
                        return;
                    }
                }
                if let Some(list) = self.list.take() {
                    self.blocks.push(Block::List {
                        ordered: list.ordered,
                        items: list.items,
                    });
                }
            }
            TagEnd::TableCell => {
                let spans = self.take_spans();
                if let Some(table) = &mut self.table {
                    table.row.push(spans);
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = &mut self.table {
                    table.header = std::mem::take(&mut table.row);
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = &mut self.table {
                    let row = std::mem::take(&mut table.row);
                    if !row.is_empty() {
                        table.rows.push(row);
                    }
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.blocks.push(Block::Table {
                        header: table.header,
                        rows: table.rows,
                    });
                }
            }
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Strikethrough => {
                self.strikethrough = self.strikethrough.saturating_sub(1)
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Block> {
        // tolerate unclosed constructs in malformed input
        if let Some(accum) = self.code_block.take() {
            self.blocks.push(Block::CodeBlock {
                language: accum.language,
                code: accum.code.trim_end_matches('\n').to_string(),
            });
        }
        if let Some(list) = self.list.take() {
            self.blocks.push(Block::List {
                ordered: list.ordered,
                items: list.items,
            });
        }
        if let Some(table) = self.table.take() {
            self.blocks.push(Block::Table {
                header: table.header,
                rows: table.rows,
            });
        }
        self.flush_paragraph();
        self.blocks
    }

    fn push_text(&mut self, text: &str) {
        if let Some(accum) = &mut self.code_block {
            accum.code.push_str(text);
            return;
        }
        self.push_span(Span {
            text: text.to_string(),
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            code: false,
            strikethrough: self.strikethrough > 0,
        });
    }

    fn push_code_span(&mut self, code: &str) {
        self.push_span(Span {
            text: code.to_string(),
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            code: true,
            strikethrough: self.strikethrough > 0,
        });
    }

    /// Soft/hard breaks and inner paragraph boundaries become a single
    /// space in the flattened inline run.
    fn push_separator(&mut self) {
        if let Some(accum) = &mut self.code_block {
            accum.code.push('\n');
            return;
        }
        match self.spans.last_mut() {
            Some(last) if !last.text.ends_with(' ') => last.text.push(' '),
            Some(_) => {}
            None => {}
        }
    }

    fn push_span(&mut self, span: Span) {
        if span.text.is_empty() {
            return;
        }
        if let Some(last) = self.spans.last_mut() {
            let same_style = last.strong == span.strong
                && last.emphasis == span.emphasis
                && last.code == span.code
                && last.strikethrough == span.strikethrough;
            if same_style {
                last.text.push_str(&span.text);
                return;
            }
        }
        self.spans.push(span);
    }

    fn take_spans(&mut self) -> Vec<Span> {
        let mut spans = std::mem::take(&mut self.spans);
        if let Some(first) = spans.first_mut() {
            let trimmed = first.text.trim_start().to_string();
            first.text = trimmed;
        }
        if let Some(last) = spans.last_mut() {
            let trimmed = last.text.trim_end().to_string();
            last.text = trimmed;
        }
        spans.retain(|span| !span.text.is_empty());
        spans
    }

    fn flush_paragraph(&mut self) {
        let spans = self.take_spans();
        if !spans.is_empty() {
            self.blocks.push(Block::Paragraph(spans));
        }
    }
}

fn heading_rank(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
