//! Defaults do monitor vindos do ambiente
//!
//! Cada parâmetro opcional do monitor (aquecimento, intervalo, buffer, valor
//! inicial, vref) tem uma variável `GASMON_*`. Um arquivo `.env` no diretório
//! de trabalho é lido na primeira consulta. Variável ausente ou ilegível cai
//! no default de fábrica; opções explícitas (TOML, builder) vencem sempre.

use std::env;
use std::str::FromStr;

use once_cell::sync::Lazy;

static ENV_FILE: Lazy<bool> = Lazy::new(|| dotenv::dotenv().is_ok());

/// `true` se um `.env` foi encontrado e carregado
pub fn env_file_loaded() -> bool {
    *ENV_FILE
}

pub const WARMUP_MS_KEY: &str = "GASMON_WARMUP_MS";
pub const SAMPLE_INTERVAL_MS_KEY: &str = "GASMON_SAMPLE_INTERVAL_MS";
pub const BUFFER_LEN_KEY: &str = "GASMON_BUFFER_LEN";
pub const START_VALUE_KEY: &str = "GASMON_START_VALUE";
pub const VREF_KEY: &str = "GASMON_VREF";

/// Lê `key` via `lookup`; ausente ou ilegível devolve `default`
pub fn lookup_or<T, F>(lookup: F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// [`lookup_or`] sobre o ambiente do processo
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    let _ = env_file_loaded();
    lookup_or(|k| env::var(k).ok(), key, default)
}

/// Aquecimento do sensor em ms (default 30000)
pub fn warmup_ms() -> u64 {
    env_or(WARMUP_MS_KEY, 30_000)
}

/// Intervalo de amostragem em ms (default 200)
pub fn sample_interval_ms() -> u64 {
    env_or(SAMPLE_INTERVAL_MS_KEY, 200)
}

/// Tamanho do buffer de média (default 8)
pub fn buffer_len() -> usize {
    env_or(BUFFER_LEN_KEY, 8)
}

/// Valor de preenchimento inicial do buffer
pub fn start_value() -> f32 {
    env_or(START_VALUE_KEY, 0.0)
}

/// Tensão de referência do ADC em volts (default 3.3)
pub fn vref() -> f32 {
    env_or(VREF_KEY, 3.3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_lookup_parses_value() {
        let env = lookup(&[(WARMUP_MS_KEY, " 1500 ")]);
        assert_eq!(lookup_or(&env, WARMUP_MS_KEY, 30_000u64), 1500);
    }

    #[test]
    fn test_lookup_missing_uses_default() {
        let env = lookup(&[]);
        assert_eq!(lookup_or(&env, BUFFER_LEN_KEY, 8usize), 8);
    }

    #[test]
    fn test_lookup_garbage_uses_default() {
        let env = lookup(&[(VREF_KEY, "three")]);
        assert_eq!(lookup_or(&env, VREF_KEY, 3.3f32), 3.3);
    }

    #[test]
    fn test_env_file_is_read_once() {
        assert_eq!(env_file_loaded(), env_file_loaded());
        assert_eq!(env_or("GASMON_UNSET_KEY_FOR_TESTS", 42u32), 42);
    }
}
