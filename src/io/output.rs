use crate::core::{Error, Result};
use crate::pipeline::GenerationOutput;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rendered C# source
    #[default]
    Source,
    /// The block sequence as JSON, for inspecting what would be rendered
    Json,
}

impl OutputFormat {
    /// Whether writing this format needs rendered source text
    pub fn needs_rendering(self) -> bool {
        matches!(self, OutputFormat::Source)
    }
}

pub trait OutputWriter {
    fn write_output(&mut self, output: &GenerationOutput) -> Result<()>;
}

pub struct SourceWriter<W: Write> {
    writer: W,
}

impl<W: Write> SourceWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for SourceWriter<W> {
    fn write_output(&mut self, output: &GenerationOutput) -> Result<()> {
        let source = output
            .source
            .as_deref()
            .ok_or_else(|| Error::Render("output was planned but not rendered".to_string()))?;
        self.writer.write_all(source.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_output(&mut self, output: &GenerationOutput) -> Result<()> {
        let json = serde_json::to_string_pretty(&output.blocks)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

pub fn create_writer<'a>(format: OutputFormat, writer: Box<dyn Write + 'a>) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Source => Box::new(SourceWriter::new(writer)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MethodDefinition, ServiceInterfaceDefinition, TypeDescriptor};
    use crate::pipeline::Generator;

    fn output() -> GenerationOutput {
        let definitions = vec![ServiceInterfaceDefinition::new(Some("Chat"), "IChatService", true)
            .with_method(
                MethodDefinition::new("Mood", TypeDescriptor::enumeration(Some("Chat"), "Mood", "Int32")),
            )];
        Generator::default().generate(&definitions).unwrap()
    }

    #[test]
    fn test_source_writer_writes_rendered_text() {
        let output = output();
        let mut buffer = Vec::new();
        SourceWriter::new(&mut buffer).write_output(&output).unwrap();
        assert_eq!(Some(String::from_utf8(buffer).unwrap()), output.source);
    }

    #[test]
    fn test_json_writer_tags_blocks() {
        let output = output();
        let mut buffer = Vec::new();
        create_writer(OutputFormat::Json, Box::new(&mut buffer))
            .write_output(&output)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        let kinds: Vec<_> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["block"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            kinds,
            vec!["registration", "resolver", "enum_formatters", "interfaces"]
        );
        assert_eq!(
            value[1]["registrations"][0]["full_name"],
            serde_json::json!("global::Chat.Mood")
        );
    }

    #[test]
    fn test_json_writer_accepts_unrendered_output() {
        let definitions = vec![ServiceInterfaceDefinition::new(None, "IPing", true)];
        let outline = Generator::default().outline(&definitions);
        assert!(!OutputFormat::Json.needs_rendering());

        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_output(&outline).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);

        let mut source = Vec::new();
        assert!(OutputFormat::Source.needs_rendering());
        assert!(matches!(
            SourceWriter::new(&mut source).write_output(&outline),
            Err(Error::Render(_))
        ));
    }
}
