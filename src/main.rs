use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use vault2rdf::emitter::ntriples::NTriplesWriter;
use vault2rdf::emitter::turtle::TurtleWriter;
use vault2rdf::emitter::DatasetSerializer;
use vault2rdf::model::ontology;
use vault2rdf::resolve::mapper::Mapper;
use vault2rdf::triplify::DEFAULT_BASE_NAMESPACE;
use vault2rdf::{
    add_missing_labels, build_index, resolve_placeholders, triplify_canvas, triplify_document,
    Dataset, IriMinter, LabelTargets, PartitionRule, TriplifyOptions, VaultIndex,
};

/// Triplify Markdown vaults and canvases into RDF graphs.
#[derive(Parser)]
#[command(name = "vault2rdf", version, about)]
struct Cli {
    /// Path to a vault directory, a .md note, or a .canvas file.
    input: PathBuf,

    /// Output file path [default: stdout].
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format: ntriples, turtle.
    #[arg(short, long, value_name = "FORMAT", default_value = "ntriples")]
    format: String,

    /// Base URI for minted terms.
    #[arg(short, long, value_name = "URI", default_value = DEFAULT_BASE_NAMESPACE)]
    base_uri: String,

    /// Partition rule: identifier, tag, or headers-h2-h3 style sets.
    #[arg(long, value_name = "RULE")]
    partition_by: Vec<String>,

    /// Emit labels for: documents, sections, properties.
    #[arg(long, value_name = "WHAT")]
    labels: Vec<String>,

    /// Record link selectors as separate triples.
    #[arg(long)]
    include_selectors: bool,

    /// Embed raw source text as a literal on each document.
    #[arg(long)]
    include_raw: bool,

    /// Declarative mapping file (YAML or JSON).
    #[arg(long, value_name = "FILE")]
    mappings: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output.
    #[arg(short, long)]
    quiet: bool,
}

fn build_options(cli: &Cli) -> Result<TriplifyOptions, Box<dyn std::error::Error>> {
    let mut partition_by = Vec::new();
    for rule in &cli.partition_by {
        partition_by.push(rule.parse::<PartitionRule>()?);
    }

    let mut labels = LabelTargets::default();
    for target in &cli.labels {
        match target.as_str() {
            "documents" => labels.documents = true,
            "sections" => labels.sections = true,
            "properties" => labels.properties = true,
            other => return Err(format!("unknown label target: {other}").into()),
        }
    }

    let mappings = match &cli.mappings {
        Some(path) => Mapper::from_file(path)?,
        None => Mapper::Null,
    };

    Ok(TriplifyOptions {
        base_namespace: cli.base_uri.clone(),
        partition_by,
        include_labels_for: labels,
        include_selectors: cli.include_selectors,
        include_raw: cli.include_raw,
        mappings,
    })
}

/// Triplify one file into the shared dataset. Returns false when the
/// document failed and was skipped.
fn convert_file(
    vault_path: &str,
    full_path: &Path,
    options: &TriplifyOptions,
    dataset: &mut Dataset,
    cli: &Cli,
) -> bool {
    let result = match full_path.extension().and_then(|e| e.to_str()) {
        Some("md") => std::fs::read_to_string(full_path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                triplify_document(vault_path, &content, options)
                    .map(|graph| graph.dataset)
                    .map_err(|e| e.to_string())
            }),
        Some("canvas") => std::fs::read_to_string(full_path)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                triplify_canvas(vault_path, &json, options).map_err(|e| e.to_string())
            }),
        _ => return true,
    };

    match result {
        Ok(doc_dataset) => {
            if cli.verbose {
                eprintln!("{vault_path}: {} triples", doc_dataset.len());
            }
            dataset.extend(doc_dataset);
            true
        }
        Err(e) => {
            // One bad document must not abort the batch.
            if !cli.quiet {
                eprintln!("skipping {vault_path}: {e}");
            }
            false
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = build_options(&cli)?;

    if cli.verbose {
        eprintln!("Reading input from: {}", cli.input.display());
    }

    let mut dataset = Dataset::new();
    let mut converted = 0u64;
    let mut skipped = 0u64;

    let index: VaultIndex = if cli.input.is_dir() {
        let index = build_index(&cli.input)?;
        for vault_path in index.files().to_vec() {
            let full_path = cli.input.join(&vault_path);
            if convert_file(&vault_path, &full_path, &options, &mut dataset, &cli) {
                converted += 1;
            } else {
                skipped += 1;
            }
        }
        index
    } else {
        // Single file: index its parent directory so placeholders resolve.
        let parent = match cli.input.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let index = build_index(parent)?;
        let name = cli
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or("input has no file name")?;
        if !convert_file(&name, &cli.input, &options, &mut dataset, &cli) {
            return Err(format!("failed to convert {}", cli.input.display()).into());
        }
        converted += 1;
        index
    };

    // Vault-wide repair barrier, then optional label enrichment.
    let iris = IriMinter::new(&options.base_namespace);
    resolve_placeholders(&mut dataset, &index, &iris);
    add_missing_labels(&mut dataset, &options);

    let output_writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let format = cli.format.to_lowercase();
    let triple_count = match format.as_str() {
        "ntriples" | "nt" => {
            let mut writer = NTriplesWriter::new(output_writer);
            writer.serialize(&dataset)?
        }
        "turtle" | "ttl" => {
            let mut writer = TurtleWriter::new(output_writer);
            writer.add_prefix("rdf", ontology::standard::RDF);
            writer.add_prefix("rdfs", ontology::standard::RDFS);
            writer.add_prefix("xsd", ontology::standard::XSD);
            writer.add_prefix(ontology::vault::PREFIX, ontology::vault::NS);
            writer.serialize(&dataset)?
        }
        _ => {
            return Err(format!("Unknown format: {format}. Use 'ntriples' or 'turtle'.").into());
        }
    };

    if !cli.quiet {
        eprintln!(
            "Converted {converted} documents ({skipped} skipped) into {triple_count} triples"
        );
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
