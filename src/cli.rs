use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pantry-import")]
#[command(about = "食料品の品目カテゴリ自動分類・一括取り込みツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 表形式ファイル（xlsx/csv/tsv）から品目種別を分類して取り込む
    Import {
        /// 入力ファイル、またはファイルを含むフォルダ
        #[arg(required = true)]
        input: PathBuf,

        /// シート名（省略時は先頭シート）
        #[arg(long)]
        sheet: Option<String>,

        /// 品目名の列見出し（省略時は設定値）
        #[arg(short, long)]
        column: Option<String>,

        /// 保存先JSONファイル
        #[arg(long)]
        store: Option<PathBuf>,

        /// カスタムルール表JSON
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// 一致しなかった品目のカテゴリ
        #[arg(short, long)]
        fallback: Option<String>,

        /// ドライラン（保存先へ書き込まない）
        #[arg(long)]
        dry_run: bool,

        /// 分類レポートの出力先（.xlsx / .json）
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// 品目名を分類して結果を表示
    Classify {
        /// 品目名（複数可）
        #[arg(required = true)]
        names: Vec<String>,

        /// カスタムルール表JSON
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// 一致しなかった品目のカテゴリ
        #[arg(short, long)]
        fallback: Option<String>,
    },

    /// ルール表を照合順に表示
    Rules {
        /// カスタムルール表JSON
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },

    /// 保存先のカテゴリを標準一覧に同期
    Categories {
        /// 保存先JSONファイル
        #[arg(long)]
        store: Option<PathBuf>,

        /// 削除の確認をスキップ
        #[arg(short, long)]
        yes: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 保存先JSONファイルを設定
        #[arg(long)]
        set_store: Option<PathBuf>,

        /// カスタムルール表JSONを設定
        #[arg(long)]
        set_rules: Option<PathBuf>,

        /// フォールバックカテゴリを設定
        #[arg(long)]
        set_fallback: Option<String>,

        /// 品目名の列見出しを設定
        #[arg(long)]
        set_column: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
