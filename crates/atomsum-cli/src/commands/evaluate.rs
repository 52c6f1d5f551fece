use crate::cli::{EvaluateArgs, ModelKind};
use crate::error::Result;
use crate::lattice;
use atomsum::core::potentials::{Ensemble, FinnisSinclair, LennardJones, OneBody, Potential};
use atomsum::engine::config::{ComputeConfig, ComputeConfigBuilder, Domain};
use atomsum::workflows::evaluate::{self, Observables};
use std::io::{self, Write};
use tracing::info;

pub fn run(args: EvaluateArgs) -> Result<()> {
    let system = lattice::simple_cubic(
        args.species,
        args.repeats,
        args.spacing,
        args.jitter,
        args.system_unit,
    )?;
    let potential = build_potential(&args);
    let config = build_config(&args)?;

    info!(
        atoms = system.positions().len(),
        model = potential.name(),
        "Evaluating observables on a {0}x{0}x{0} {1} cluster.",
        args.repeats,
        args.species
    );
    let observables = evaluate::evaluate_all(&potential, &system, &config)?;

    let stdout = io::stdout();
    write_report(&mut stdout.lock(), &observables, args.per_atom)?;
    Ok(())
}

pub fn build_potential(args: &EvaluateArgs) -> Potential {
    let model = match args.model {
        ModelKind::LennardJones => {
            Potential::generic(LennardJones::new(args.r_min, args.epsilon, args.cutoff))
        }
        ModelKind::FinnisSinclair => {
            Potential::generic(FinnisSinclair::new(args.strength, args.cutoff))
        }
    };
    match args.e0 {
        Some(e0) => {
            let reference = OneBody::from_iter([(args.species, e0)]).with_name("reference");
            Potential::from(
                Ensemble::new(vec![model, Potential::from(reference)]).with_name("model+reference"),
            )
        }
        None => model,
    }
}

pub fn build_config(args: &EvaluateArgs) -> Result<ComputeConfig> {
    let mut builder = ComputeConfigBuilder::new();
    if let Some(atoms) = &args.atoms {
        builder = builder.domain(Domain::Atoms(atoms.clone()));
    }
    if let Some(ntasks) = args.ntasks {
        builder = builder.ntasks(ntasks);
    }
    if let Some(unit) = args.energy_unit {
        builder = builder.energy_unit(unit);
    }
    if let Some(unit) = args.length_unit {
        builder = builder.length_unit(unit);
    }
    if let Some(unit) = args.cutoff_unit {
        builder = builder.cutoff_unit(unit);
    }
    Ok(builder.build()?)
}

pub fn write_report<W: Write>(out: &mut W, observables: &Observables, per_atom: bool) -> io::Result<()> {
    let Observables {
        energy,
        site_energies,
        forces,
        virial,
    } = observables;

    writeln!(out, "Energy:       {:>18.10} {}", energy.value, energy.unit)?;
    writeln!(
        out,
        "Atoms:        {:>18} of {}",
        site_energies.len(),
        forces.len()
    )?;
    let net = forces.total();
    writeln!(
        out,
        "Net force:    {:>12.4e} {:>12.4e} {:>12.4e} {}",
        net.x, net.y, net.z, forces.unit
    )?;
    writeln!(out, "Virial ({}):", virial.unit)?;
    for row in virial.value.row_iter() {
        writeln!(out, "  {:>16.8e} {:>16.8e} {:>16.8e}", row[0], row[1], row[2])?;
    }

    if per_atom {
        writeln!(out)?;
        writeln!(
            out,
            "{:>6} {:>18} {:>16} {:>16} {:>16}",
            "atom", "energy", "fx", "fy", "fz"
        )?;
        for (i, e) in site_energies.iter() {
            let f = forces.values[i];
            writeln!(
                out,
                "{:>6} {:>18.10} {:>16.8e} {:>16.8e} {:>16.8e}",
                i, e, f.x, f.y, f.z
            )?;
        }
    }
    Ok(())
}
