#![forbid(unsafe_code)]

//! Scripted walkthrough of the submission workflow.
//!
//! Drives the controller against the transcript surface and the simulated
//! transport: one rejected attempt, then a corrected attempt that delivers.
//! The recorded surface transcript is printed at the end, so the whole
//! lifecycle (error presentation, focus move, loading state, success reset)
//! is visible in one run.
//!
//! Run: `cargo run -p formflow-demo`

use std::time::Duration;

use formflow_core::Field;
use formflow_runtime::{
    FailurePolicy, FormEvent, FormProgram, SimulatedTransport, SurfaceCall, TranscriptSurface,
};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let transport = SimulatedTransport::new().with_delay(Duration::from_millis(200));
    let mut program = FormProgram::new(
        TranscriptSurface::new(),
        transport,
        FailurePolicy::Report,
    );

    // First pass: a form with problems. Blur shows errors as the user moves
    // through the fields; submit is rejected.
    {
        let surface = program.surface_mut();
        surface.set_value(Field::Name, "J");
        surface.set_value(Field::Email, "jane@nowhere");
        surface.set_value(Field::Phone, "555-12");
        surface.set_value(Field::Message, "Hi");
    }
    for field in Field::ALL {
        program.handle(FormEvent::Blur(field));
    }
    program.handle(FormEvent::Submit);

    // Second pass: the user fixes every field and resubmits.
    {
        let surface = program.surface_mut();
        surface.set_value(Field::Name, "Jane Doe");
        surface.set_value(Field::Email, "jane@example.com");
        surface.set_value(Field::Phone, "(555) 123-4567");
        surface.set_value(Field::Message, "Hello, I would like a quote.");
    }
    for field in Field::ALL {
        program.handle(FormEvent::Input(field));
    }
    program.handle(FormEvent::Submit);
    program.settle();

    println!("deliveries: {}", program.transport().deliveries());
    println!("transcript:");
    for call in program.surface().calls() {
        println!("  {}", describe(call));
    }
}

fn describe(call: &SurfaceCall) -> String {
    match call {
        SurfaceCall::ShowFieldError { field, message } => {
            format!("show error   {field}: {message}")
        }
        SurfaceCall::ClearFieldError { field } => format!("clear error  {field}"),
        SurfaceCall::FocusField { field } => format!("focus        {field}"),
        SurfaceCall::SetBusy { busy } => format!("busy         {busy}"),
        SurfaceCall::ShowNotice { kind, message } => {
            format!("notice       {kind:?}: {message}")
        }
        SurfaceCall::ClearNotice => "notice       cleared".to_string(),
        SurfaceCall::ResetFields => "fields       reset".to_string(),
        SurfaceCall::RevealNotice => "notice       revealed".to_string(),
    }
}
