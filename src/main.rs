/*!
 * Tracked Pool - Demo Entry Point
 *
 * Runs the reference pool scenarios and prints each pool's dump:
 * - A: allocate, free one, free all, destroy
 * - B: duplicate an allocation and compare bytes
 * - C: move an allocation between two pools
 *
 * `--trip <kind>` then commits one deliberate usage error so the configured
 * failure policy (POOL_FAILURE_POLICY) can be observed end to end.
 */

use miette::{ensure, miette, IntoDiagnostic, Result};
use std::io::{self, Write};
use tracing::info;

use tracked_pool::{
    call_site, init_tracing, Handle, LocalPool, PoolConfig, PoolReport, SharedList, SharedPool,
};

const USAGE: &str = "\
Usage: pool-demo [--json] [--trip <kind>]

Options:
  --json          Print pool dumps as JSON reports
  --trip <kind>   Commit one usage error after the scenarios:
                  foreign, non-empty-destroy, null, zero-size, stale, empty-pop
  -h, --help      Show this message

Environment:
  POOL_FAILURE_POLICY      propagate | exit | abort (default: propagate)
  POOL_TOLERATE_EMPTY_POP  1 | true
  POOL_TRACE_JSON          1 | true
  RUST_LOG                 log filter (default: info)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trip {
    Foreign,
    NonEmptyDestroy,
    Null,
    ZeroSize,
    Stale,
    EmptyPop,
}

impl Trip {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "foreign" => Some(Trip::Foreign),
            "non-empty-destroy" => Some(Trip::NonEmptyDestroy),
            "null" => Some(Trip::Null),
            "zero-size" => Some(Trip::ZeroSize),
            "stale" => Some(Trip::Stale),
            "empty-pop" => Some(Trip::EmptyPop),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    json: bool,
    trip: Option<Trip>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args::default();
    let mut raw = std::env::args().skip(1);

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--json" => args.json = true,
            "--trip" => {
                let kind = raw
                    .next()
                    .ok_or_else(|| miette!("--trip needs a kind\n\n{}", USAGE))?;
                args.trip = Some(
                    Trip::parse(&kind)
                        .ok_or_else(|| miette!("unknown trip kind '{}'\n\n{}", kind, USAGE))?,
                );
            }
            "-h" | "--help" => return Ok(None),
            other => return Err(miette!("unknown argument '{}'\n\n{}", other, USAGE)),
        }
    }
    Ok(Some(args))
}

fn dump(report: &PoolReport, json: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    if json {
        let text = serde_json::to_string_pretty(report).into_diagnostic()?;
        writeln!(out, "{}", text).into_diagnostic()?;
    } else {
        write!(out, "{}", report).into_diagnostic()?;
    }
    Ok(())
}

/// Scenario A: individual and bulk release
fn scenario_a(config: &PoolConfig, json: bool) -> Result<()> {
    let mut pool = LocalPool::with_config(call_site!("scenario A"), config.clone());

    let x = pool.allocate(64, call_site!("x"))?;
    let _y = pool.allocate(128, call_site!("y"))?;
    ensure!(pool.count() == 2, "expected 2 allocations, found {}", pool.count());
    ensure!(pool.bytes() == 192, "expected 192 bytes, found {}", pool.bytes());
    dump(&pool.report(), json)?;

    pool.free(x)?;
    ensure!(pool.count() == 1 && pool.bytes() == 128, "free(x) left {:?}", pool.stats());

    let released = pool.free_all()?;
    ensure!(pool.count() == 0, "free_all left {} allocations", pool.count());
    info!(released, "scenario A complete");

    pool.destroy().map_err(|rejected| rejected.into_parts().0)?;
    Ok(())
}

/// Scenario B: duplicate and compare
fn scenario_b(config: &PoolConfig, json: bool) -> Result<()> {
    let mut pool = LocalPool::with_config(call_site!("scenario B"), config.clone());

    let z = pool.allocate(10, call_site!("z"))?;
    pool.write_at(z, 0, b"abcdefghij")?;
    let w = pool.duplicate(z, 10, call_site!("w"))?;
    ensure!(w != z, "duplicate returned the source handle");
    ensure!(
        pool.view(w)? == pool.view(z)?,
        "duplicate bytes differ from source"
    );
    dump(&pool.report(), json)?;

    pool.free(z)?;
    pool.free(w)?;
    info!("scenario B complete");

    pool.destroy().map_err(|rejected| rejected.into_parts().0)?;
    Ok(())
}

/// Scenario C: cross-pool reallocate on shared pools
fn scenario_c(config: &PoolConfig, json: bool) -> Result<()> {
    let p1 = SharedPool::with_config(call_site!("scenario C / P1"), config.clone());
    let p2 = SharedPool::with_config(call_site!("scenario C / P2"), config.clone());

    let a = p1.allocate(32, call_site!("a"))?;
    p1.view_mut(a)?.fill(0xAB);
    let b = p2.reallocate_from(&p1, a, 64, call_site!("b"))?;
    ensure!(p1.bytes() == 0, "P1 still holds {} bytes", p1.bytes());
    ensure!(p2.bytes() == 64, "P2 holds {} bytes, expected 64", p2.bytes());
    ensure!(
        p2.view(b)?[..32].iter().all(|byte| *byte == 0xAB),
        "moved prefix was not preserved"
    );
    dump(&p2.report(), json)?;

    p2.free(b)?;
    info!("scenario C complete");

    p1.destroy().map_err(|rejected| rejected.into_parts().0)?;
    p2.destroy().map_err(|rejected| rejected.into_parts().0)?;
    Ok(())
}

/// Commit one usage error under the configured policy
fn trip(kind: Trip, config: &PoolConfig) -> Result<()> {
    let mut pool = LocalPool::with_config(call_site!("trip"), config.clone());
    info!(?kind, policy = %config.policy.on_failure, "tripping usage error");

    let outcome = match kind {
        Trip::Foreign => {
            let mut other = LocalPool::with_config(call_site!("other"), config.clone());
            let h = other.allocate(8, call_site!())?;
            let outcome = pool.free(h).map(drop);
            other.free_all()?;
            outcome
        }
        Trip::NonEmptyDestroy => {
            pool.allocate(8, call_site!("never freed"))?;
            return pool
                .destroy()
                .map_err(|rejected| rejected.into_parts().0.into());
        }
        Trip::Null => pool.free(Handle::NULL).map(drop),
        Trip::ZeroSize => pool.allocate(0, call_site!()).map(drop),
        Trip::Stale => {
            let h = pool.allocate(8, call_site!())?;
            pool.free(h)?;
            pool.free(h).map(drop)
        }
        Trip::EmptyPop => {
            let list: SharedList<u32> = SharedList::with_policy(config.policy);
            return match list.pop_back()? {
                Some(_) => Err(miette!("pop on an empty list returned a value")),
                None => {
                    info!("empty pop tolerated");
                    Ok(())
                }
            };
        }
    };
    outcome.map_err(Into::into)
}

fn main() -> Result<()> {
    init_tracing();

    let Some(args) = parse_args()? else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = PoolConfig::from_env();
    info!(
        policy = %config.policy.on_failure,
        tolerate_empty_pop = config.policy.tolerate_empty_pop,
        "pool demo starting"
    );

    scenario_a(&config, args.json)?;
    scenario_b(&config, args.json)?;
    scenario_c(&config, args.json)?;

    if let Some(kind) = args.trip {
        trip(kind, &config)?;
    }

    info!("pool demo finished");
    Ok(())
}
