use atomsum::core::models::species::Species;
use atomsum::core::units::{EnergyUnit, LengthUnit};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Atomsum Developers",
    version,
    about = "atomsum CLI - evaluate energies, per-atom energies, forces and virials of interatomic potentials on generated atomic clusters.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Number of threads in the global pool.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate all observables of a model on a simple-cubic cluster.
    Evaluate(EvaluateArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Shifted Lennard-Jones 12-6 pair potential
    #[value(name = "lj")]
    LennardJones,
    /// Finnis-Sinclair square-root embedding
    #[value(name = "fs")]
    FinnisSinclair,
}

/// Arguments for the `evaluate` subcommand.
#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    // --- System ---
    /// Atoms along each edge of the cubic cluster.
    #[arg(short = 'n', long, default_value_t = 4, value_name = "INT")]
    pub repeats: usize,

    /// Lattice spacing, in the system length unit.
    #[arg(short, long, default_value_t = 3.8, value_name = "FLOAT")]
    pub spacing: f64,

    /// Maximum displacement of each coordinate from its lattice site.
    #[arg(long, default_value_t = 0.05, value_name = "FLOAT")]
    pub jitter: f64,

    /// Element symbol or atomic number of every atom.
    #[arg(long, default_value = "Ar", value_name = "SPECIES")]
    pub species: Species,

    /// Unit the generated positions are expressed in (angstrom, nm, bohr).
    #[arg(long, default_value = "angstrom", value_name = "UNIT")]
    pub system_unit: LengthUnit,

    // --- Model ---
    /// Potential model to evaluate.
    #[arg(short, long, value_enum, default_value_t = ModelKind::LennardJones)]
    pub model: ModelKind,

    /// Lennard-Jones well depth.
    #[arg(long, default_value_t = 0.0104, value_name = "FLOAT")]
    pub epsilon: f64,

    /// Lennard-Jones pair distance at the energy minimum.
    #[arg(long, default_value_t = 3.82, value_name = "FLOAT")]
    pub r_min: f64,

    /// Finnis-Sinclair embedding strength.
    #[arg(long, default_value_t = 0.3, value_name = "FLOAT")]
    pub strength: f64,

    /// Interaction cutoff radius.
    #[arg(short, long, default_value_t = 8.5, value_name = "FLOAT")]
    pub cutoff: f64,

    /// Add a one-body reference energy per atom, evaluated as an ensemble with the model.
    #[arg(long, value_name = "FLOAT", allow_hyphen_values = true)]
    pub e0: Option<f64>,

    // --- Evaluation ---
    /// Restrict per-atom evaluation to these atom indices (comma separated).
    #[arg(long, value_delimiter = ',', value_name = "INDICES")]
    pub atoms: Option<Vec<usize>>,

    /// Number of force accumulation chunks. Defaults to the thread count.
    #[arg(long, value_name = "INT")]
    pub ntasks: Option<usize>,

    /// Report energies in this unit (ev, kcal/mol, kj/mol, hartree, rydberg).
    #[arg(long, value_name = "UNIT")]
    pub energy_unit: Option<EnergyUnit>,

    /// Report lengths in this unit (angstrom, nm, bohr).
    #[arg(long, value_name = "UNIT")]
    pub length_unit: Option<LengthUnit>,

    /// Interpret the cutoff in this unit instead of the model length unit.
    #[arg(long, value_name = "UNIT")]
    pub cutoff_unit: Option<LengthUnit>,

    /// Print per-atom energies and forces.
    #[arg(long)]
    pub per_atom: bool,
}
