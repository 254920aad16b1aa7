// src/main.rs
//
// Calculatrice BEDMAS : point d’entrée CLI + NATIF + WEB (WASM)
// -------------------------------------------------------------
// But:
// - CLI (calc 2 x 3 + 4)           : évalue, affiche le résultat, sort
// - NATIF (sans expression)         : eframe::run_native + NativeOptions
// - WEB  (wasm32)                   : eframe::WebRunner + WebOptions + <canvas>
//
// Côté WEB (WASM) : index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>
//
// IMPORTANT (structure projet):
// - `impl eframe::App for AppCalc` vit dans src/app.rs
// - Le noyau est la bibliothèque (calculatrice_bedmas::noyau)

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;
#[cfg(not(target_arch = "wasm32"))]
mod cli;

use app::AppCalc;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice BEDMAS";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = cli::Cli::parse();
    installer_logs(cli.verbose);

    match cli.expression_string() {
        Some(texte) => calculer(&texte, cli.precision(), cli.verbose),
        None => lancer_interface(),
    }
}

/// Logs sur stderr : RUST_LOG si présent, sinon warn (debug avec --verbose).
#[cfg(not(target_arch = "wasm32"))]
fn installer_logs(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let defaut = if verbose { "debug" } else { "warn" };
    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(defaut));

    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(not(target_arch = "wasm32"))]
fn calculer(texte: &str, precision: usize, verbose: bool) -> anyhow::Result<()> {
    use anyhow::Context;
    use calculatrice_bedmas::noyau::{eval_expression, format::format_nombre};

    let (valeur, canonique, demarche) =
        eval_expression(texte, precision).with_context(|| format!("expression {texte:?}"))?;

    if verbose {
        println!("expression : {canonique}");
        println!("étape      : {}", demarche.etape);
    }
    println!("{}", format_nombre(valeur, precision));
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn lancer_interface() -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([520.0, 740.0])
            .with_min_inner_size([420.0, 620.0]),
        ..Default::default()
    };

    // eframe::Error n’est pas Send + Sync : on garde seulement le message
    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(|_cc| Ok(Box::<AppCalc>::default())),
    )
    .map_err(|e| anyhow::anyhow!("interface graphique : {e}"))
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|_cc| Ok(Box::<AppCalc>::default())),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
