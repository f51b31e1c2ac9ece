use clap::Parser;
use dialoguer::Confirm;
use pantry_common::CURATED_CATEGORIES;
use pantry_import::{categories, cli, config, error, import, load_classifier, logging, report, source, store};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use store::{GroceryStore, JsonStore};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Import { input, sheet, column, store: store_override, rules, fallback, dry_run, report: report_path } => {
            println!("🛒 pantry-import - 品目種別の取り込み{}\n", if dry_run { "（ドライラン）" } else { "" });

            // 1. 入力と保存先
            println!("[1/3] 入力を確認中...");
            let inputs = source::resolve_inputs(&input)?;
            if inputs.is_empty() {
                return Err(error::PantryImportError::FileNotFound(input.display().to_string()));
            }
            let store_path = config.resolve_store_path(store_override.as_deref())?;
            let mut grocery_store = JsonStore::open(&store_path)?;
            let classifier = load_classifier(config.resolve_rules_path(rules.as_deref()))?;
            println!("✔ {}ファイル / 保存先: {}\n", inputs.len(), store_path.display());

            let source_options = source::SourceOptions {
                sheet,
                column: column.unwrap_or_else(|| config.name_column.clone()),
            };
            let import_options = import::ImportOptions {
                fallback: config.resolve_fallback(fallback.as_deref()).to_string(),
                dry_run,
                show_progress: !cli.verbose,
            };

            // 2. 分類・登録
            println!("[2/3] 分類中...");
            let mut combined = import::ImportReport::default();
            for path in &inputs {
                let label = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                let rows = source::read_rows(path, &source_options)?;
                println!("  {}: {}行", label, rows.len());

                let file_report = import::import_rows(&mut grocery_store, &classifier, &label, &rows, &import_options)?;
                if cli.verbose {
                    for row in &file_report.rows {
                        println!("    {} -> {} ({})", row.name, row.category_label(), row.outcome);
                    }
                }
                combined.merge(file_report);
            }
            println!("✔ 分類完了\n");

            // 3. 保存
            println!("[3/3] 保存中...");
            if !dry_run && combined.summary.has_changes() {
                grocery_store.save()?;
                println!("✔ 保存先を更新: {}", store_path.display());
            } else {
                println!("✔ 保存先の変更なし");
            }

            if let Some(report_path) = report_path {
                report::export_report(&combined, &report_path)?;
                println!("✔ レポートを出力: {}", report_path.display());
            }

            let s = &combined.summary;
            println!("\n集計:");
            println!("  読み込み: {}行（空行スキップ: {}）", s.total, s.skipped_blank);
            if dry_run {
                println!("  分類のみ: {}", s.planned);
            } else {
                println!("  追加: {} / 更新: {} / 変更なし: {}", s.inserted, s.updated, s.unchanged);
            }
            println!("  フォールバック: {}", s.fallback);
            if s.failed > 0 {
                println!("  ⚠ 失敗: {}（-v で詳細）", s.failed);
            }

            println!("\n✅ 取り込み完了");
        }

        Commands::Classify { names, rules, fallback } => {
            let classifier = load_classifier(config.resolve_rules_path(rules.as_deref()))?;
            let fallback = config.resolve_fallback(fallback.as_deref());

            for name in &names {
                let result = classifier.classify(name, fallback);
                match &result.matched_rule {
                    Some(rule) => println!("{} -> {} (優先度 {})", name, rule.category, rule.priority + 1),
                    None => println!("{} -> {} (Default)", name, result.matched_category),
                }
            }
        }

        Commands::Rules { rules } => {
            let classifier = load_classifier(config.resolve_rules_path(rules.as_deref()))?;
            println!("ルール表（照合順）:");
            for rule in classifier.rules() {
                println!("  {:>2}. {} ({}語)", rule.priority + 1, rule.category, rule.keywords.len());
                if cli.verbose {
                    println!("      {}", rule.keywords.join(", "));
                }
            }
            let invalid = classifier.invalid_keywords();
            if !invalid.is_empty() {
                println!("\n⚠ 無効なキーワード（照合対象外）:");
                for k in invalid {
                    println!("  {} / {}: {}", k.category, k.keyword, k.reason);
                }
            }
            println!("\nフォールバック: {}", config.fallback_category);
        }

        Commands::Categories { store: store_override, yes } => {
            println!("📂 pantry-import - カテゴリ同期\n");

            let store_path = config.resolve_store_path(store_override.as_deref())?;
            let mut grocery_store = JsonStore::open(&store_path)?;

            let summary = categories::sync_categories(&mut grocery_store, CURATED_CATEGORIES, |category| {
                if yes {
                    return true;
                }
                Confirm::new()
                    .with_prompt(format!("未使用のカテゴリ '{}' を削除しますか？", category.name))
                    .default(false)
                    .interact()
                    .unwrap_or(false)
            })?;

            grocery_store.save()?;

            if let Some((from, to)) = &summary.renamed {
                println!("✔ 改名: {} → {}", from, to);
            }
            for name in &summary.inserted {
                println!("✔ 追加: {}", name);
            }
            for name in &summary.updated {
                println!("✔ 表示順を更新: {}", name);
            }
            for name in &summary.deleted {
                println!("✔ 削除: {}", name);
            }
            for name in &summary.kept {
                println!("- 残す: {}", name);
            }
            if summary.reassigned > 0 {
                println!("✔ {}件の品目種別を '{}' へ付け替え", summary.reassigned, categories::REASSIGN_CATEGORY);
            }

            println!("\n✅ カテゴリ同期完了（{}件）", grocery_store.categories().len());
        }

        Commands::Config { set_store, set_rules, set_fallback, set_column, show } => {
            let mut config = config;
            let changed = set_store.is_some() || set_rules.is_some() || set_fallback.is_some() || set_column.is_some();

            if let Some(path) = set_store {
                config.store_path = Some(path);
            }
            if let Some(path) = set_rules {
                config.rules_path = Some(path);
            }
            if let Some(category) = set_fallback {
                config.fallback_category = category;
            }
            if let Some(column) = set_column {
                config.name_column = column;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  保存先: {}", config.resolve_store_path(None)?.display());
                println!(
                    "  ルール表: {}",
                    config.rules_path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "組み込み".into())
                );
                println!("  フォールバック: {}", config.fallback_category);
                println!("  品目名の列: {}", config.name_column);
            }
        }
    }

    Ok(())
}
