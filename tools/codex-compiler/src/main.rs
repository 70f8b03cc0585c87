use clap::Parser;
use std::fs;
use std::path::PathBuf;
use uncial_export::{render, Instruction, RunStyle};
use uncial_protocol::Project;
use rkyv::ser::{serializers::AllocSerializer, Serializer};

#[derive(Parser)]
#[command(author, version, about = "Compiles a JSON project to an rkyv binary codex")]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Also write a plain-text preview of the export stream
    #[arg(long, value_name = "FILE")]
    render: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    println!("📖 Reading JSON from {:?}...", cli.input);
    let input_data = fs::read_to_string(&cli.input)?;

    let project: Project = serde_json::from_str(&input_data)?;

    println!(
        "⚙️  Compiling project '{}' version {} with {} sentences...",
        project.name,
        project.version,
        project.sentences.len()
    );

    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(&project)
        .expect("Failed to rkyv serialize");
    let bytes = serializer.into_serializer().into_inner();

    fs::write(&cli.output, bytes)?;

    if let Some(path) = &cli.render {
        let preview = render_preview(&project);
        fs::write(path, preview)?;
        println!("📝 Preview written to {path:?}");
    }

    println!("✅ Success! Binary written to {:?}", cli.output);
    Ok(())
}

/// Flatten the instruction stream into readable text: one line per
/// paragraph, tier runs marked with ^ and _.
fn render_preview(project: &Project) -> String {
    let mut out = String::new();
    for instruction in render(&project.sentences) {
        match instruction {
            Instruction::ParagraphBegin => {}
            Instruction::Run { text, style } => {
                match style {
                    RunStyle::Plain | RunStyle::Italic => {}
                    RunStyle::Superscript => out.push('^'),
                    RunStyle::Subscript => out.push('_'),
                }
                out.push_str(&text);
            }
            Instruction::ParagraphEnd => out.push('\n'),
        }
    }
    out
}
