//! 로깅 초기화.
//!
//! `RUST_LOG`가 있으면 그 필터를 그대로 쓰고, 없으면 바이너리가 넘긴 레벨을
//! 리포트 크레이트 전체에 적용합니다. 출력 형식은 `LOG_FORMAT`
//! (`pretty` | `json` | `compact`)으로 고릅니다.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 레벨 필터가 적용되는 워크스페이스 크레이트
const REPORT_CRATES: [&str; 4] = ["report_core", "report_data", "report_collector", "report_api"];

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 개발용, 여러 줄 + 색상
    #[default]
    Pretty,
    /// 로그 수집기용 한 줄 JSON (이벤트 필드를 최상위로 펼침)
    Json,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            other => Err(format!("LOG_FORMAT must be pretty, json or compact (got {:?})", other)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `EnvFilter` 지시자 (`RUST_LOG`가 없을 때만 사용)
    pub filter: String,
    pub format: LogFormat,
    /// ANSI 색상 출력 여부
    pub ansi: bool,
}

impl LogConfig {
    /// 모든 리포트 크레이트에 `level`을 적용하는 설정.
    pub fn for_level(level: &str) -> Self {
        Self {
            filter: crate_filter(level),
            format: LogFormat::default(),
            ansi: true,
        }
    }

    /// 외부 크레이트용 지시자를 덧붙입니다 (예: `tower_http=debug`).
    pub fn with_directive(mut self, directive: &str) -> Self {
        self.filter.push(',');
        self.filter.push_str(directive);
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        // 로그 수집기에 escape 코드가 섞이지 않도록
        self.ansi = self.ansi && format != LogFormat::Json;
        self
    }

    /// `LOG_FORMAT`과 `NO_COLOR`를 반영한 설정.
    ///
    /// `LOG_FORMAT` 값이 잘못되면 기본 형식으로 진행합니다.
    pub fn from_env(level: &str) -> Self {
        let mut config = Self::for_level(level);
        config.ansi = std::env::var_os("NO_COLOR").is_none();

        let format = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        config.with_format(format)
    }
}

/// `report_core=<level>,report_data=<level>,...` 형태의 필터 문자열
pub fn crate_filter(level: &str) -> String {
    REPORT_CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// 전역 subscriber를 설치합니다. 두 번째 호출은 에러를 반환합니다.
///
/// ```no_run
/// use report_core::logging::{init_logging, LogConfig, LogFormat};
///
/// init_logging(LogConfig::for_level("debug").with_format(LogFormat::Json)).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.filter))?;

    let output = match config.format {
        LogFormat::Pretty => fmt::layer().pretty().with_ansi(config.ansi).boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_ansi(false)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_ansi(config.ansi).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()?;
    Ok(())
}
