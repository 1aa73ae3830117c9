use anyhow::Result;
use placematch_model::{MatchOptions, RankedCandidate};

use crate::cli::{ApplyArgs, InspectArgs, MatchArgs, TargetArgs};
use placematch_cli::workflow::{
    ApplyOutcome, ApplyRequest, MatchOutcome, MatchRequest, NameColumn, run_apply, run_inspect,
    run_match,
};

fn target_column(args: &TargetArgs) -> NameColumn {
    NameColumn::new(&args.target, &args.target_column).with_parent(args.target_parent.clone())
}

fn match_options(args: &MatchArgs) -> MatchOptions {
    MatchOptions::default()
        .with_case_fold(!args.target.no_case_fold)
        .with_unique_only(!args.keep_exact)
        .with_cutoff(args.cutoff)
        .with_as_table(!args.detail)
        .with_scope_by_parent(args.scope_by_parent)
}

pub fn match_names(args: &MatchArgs) -> Result<MatchOutcome> {
    let source = NameColumn::new(&args.source, &args.source_column)
        .with_parent(args.source_parent.clone());
    let request = MatchRequest {
        options: match_options(args),
        overrides: args.overrides.clone(),
        invert_overrides: args.invert_overrides,
        rejected: args.reject.clone(),
        mapping_out: args.mapping_out.clone(),
        report_out: args.report_out.clone(),
        ..MatchRequest::new(source, target_column(&args.target))
    };
    run_match(&request)
}

pub fn apply_mapping(args: &ApplyArgs) -> Result<ApplyOutcome> {
    run_apply(&ApplyRequest {
        input: args.input.clone(),
        column: args.column.clone(),
        mapping: args.mapping.clone(),
        output: args.output.clone(),
    })
}

pub fn inspect_name(args: &InspectArgs) -> Result<Vec<RankedCandidate>> {
    let options = MatchOptions::default().with_case_fold(!args.target.no_case_fold);
    run_inspect(&args.name, &target_column(&args.target), options, args.top)
}
