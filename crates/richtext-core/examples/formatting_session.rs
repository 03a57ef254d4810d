//! A complete editing session: type a note, format it the way a toolbar
//! would, persist it, and load it back.
//!
//! Run with: `cargo run --example formatting_session`

use richtext_core::{
    CharFormat, Color, FormatOp, FormattingEngine, Selection, codec,
};

fn main() {
    let mut engine = FormattingEngine::empty();

    // Type the note.
    engine.insert(0, "Trip checklist\npassport\ncharger\n").unwrap();

    // Bold the title.
    engine.apply(FormatOp::Bold, Selection::new(0, 14)).unwrap();

    // Turn the two items into a bullet list with one selection.
    engine
        .apply(FormatOp::BulletList, Selection::new(15, 31))
        .unwrap();

    // Highlight "passport" (shifted by the inserted markers).
    engine
        .apply(FormatOp::Highlight(Color::YELLOW), Selection::new(17, 25))
        .unwrap();

    println!("text:\n{}\n", engine.document().text());
    println!("runs:");
    for run in engine.document().runs() {
        println!("  [{:>3}, {:>3})  {:?}", run.start, run.end, run.attrs);
    }

    // What a toolbar would highlight for the title selection.
    let active = engine.active_formats(Selection::new(0, 14)).unwrap();
    assert!(active.contains(&CharFormat::Bold));
    println!("\nactive formats over the title: {active:?}");

    // Persist and reload.
    let doc = engine.into_document();
    let bytes = codec::encode(&doc).expect("encode");
    println!("\nencoded payload: {} bytes", bytes.len());

    let restored = codec::decode(&bytes).expect("decode");
    assert_eq!(restored, doc);
    println!("round-trip OK; plain text projection:\n{}", codec::plain_text(&restored));
}
