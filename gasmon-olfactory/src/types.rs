//! Tipos de dados olfativos

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Gás/composto medido pelo driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GasKind {
    /// Gás liquefeito de petróleo
    Lpg,
    /// Metano (gás natural)
    Methane,
    /// Propano
    Propane,
    /// Butano
    Butane,
    /// Hidrogênio
    Hydrogen,
    /// Monóxido de carbono
    CarbonMonoxide,
    /// Álcool (etanol)
    Alcohol,
    /// Fumaça
    Smoke,
    /// Amônia
    Ammonia,
    /// Benzeno
    Benzene,
    /// Dióxido de carbono
    CarbonDioxide,
}

impl GasKind {
    /// Código curto usado pelos drivers (`read("LPG")`)
    pub fn code(&self) -> &'static str {
        match self {
            GasKind::Lpg => "LPG",
            GasKind::Methane => "CH4",
            GasKind::Propane => "C3H8",
            GasKind::Butane => "C4H10",
            GasKind::Hydrogen => "H2",
            GasKind::CarbonMonoxide => "CO",
            GasKind::Alcohol => "ALCOHOL",
            GasKind::Smoke => "SMOKE",
            GasKind::Ammonia => "NH3",
            GasKind::Benzene => "C6H6",
            GasKind::CarbonDioxide => "CO2",
        }
    }

    /// Retorna nome legível do gás
    pub fn name(&self) -> &'static str {
        match self {
            GasKind::Lpg => "Liquefied Petroleum Gas",
            GasKind::Methane => "Methane",
            GasKind::Propane => "Propane",
            GasKind::Butane => "Butane",
            GasKind::Hydrogen => "Hydrogen",
            GasKind::CarbonMonoxide => "Carbon Monoxide",
            GasKind::Alcohol => "Alcohol",
            GasKind::Smoke => "Smoke",
            GasKind::Ammonia => "Ammonia",
            GasKind::Benzene => "Benzene",
            GasKind::CarbonDioxide => "Carbon Dioxide",
        }
    }
}

impl fmt::Display for GasKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for GasKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_uppercase().as_str() {
            "LPG" => GasKind::Lpg,
            "CH4" | "METHANE" => GasKind::Methane,
            "C3H8" | "PROPANE" => GasKind::Propane,
            "C4H10" | "BUTANE" => GasKind::Butane,
            "H2" | "HYDROGEN" => GasKind::Hydrogen,
            "CO" | "CARBON MONOXIDE" => GasKind::CarbonMonoxide,
            "ALCOHOL" | "ETHANOL" => GasKind::Alcohol,
            "SMOKE" => GasKind::Smoke,
            "NH3" | "AMMONIA" => GasKind::Ammonia,
            "C6H6" | "BENZENE" => GasKind::Benzene,
            "CO2" | "CARBON DIOXIDE" => GasKind::CarbonDioxide,
            other => return Err(format!("unknown gas '{other}'")),
        };
        Ok(kind)
    }
}

impl TryFrom<String> for GasKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GasKind> for String {
    fn from(kind: GasKind) -> Self {
        kind.code().to_string()
    }
}

/// Modelo de sensor da série MQ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SensorModel {
    Mq2,
    Mq3,
    Mq4,
    Mq5,
    Mq6,
    Mq7,
    Mq8,
    Mq9,
    Mq135,
}

impl SensorModel {
    /// Nome no formato do fabricante (`"MQ6"`)
    pub fn code(&self) -> &'static str {
        match self {
            SensorModel::Mq2 => "MQ2",
            SensorModel::Mq3 => "MQ3",
            SensorModel::Mq4 => "MQ4",
            SensorModel::Mq5 => "MQ5",
            SensorModel::Mq6 => "MQ6",
            SensorModel::Mq7 => "MQ7",
            SensorModel::Mq8 => "MQ8",
            SensorModel::Mq9 => "MQ9",
            SensorModel::Mq135 => "MQ135",
        }
    }

    /// Gases que o elemento sensor consegue medir
    pub fn supported_gases(&self) -> &'static [GasKind] {
        use GasKind::*;
        match self {
            SensorModel::Mq2 => &[Lpg, Propane, Hydrogen, Methane, Smoke, Alcohol],
            SensorModel::Mq3 => &[Alcohol, Benzene],
            SensorModel::Mq4 => &[Methane, Lpg],
            SensorModel::Mq5 => &[Lpg, Methane, Hydrogen],
            SensorModel::Mq6 => &[Lpg, Butane, Propane],
            SensorModel::Mq7 => &[CarbonMonoxide, Hydrogen],
            SensorModel::Mq8 => &[Hydrogen],
            SensorModel::Mq9 => &[CarbonMonoxide, Methane, Lpg],
            SensorModel::Mq135 => &[CarbonDioxide, Ammonia, Benzene, Alcohol, Smoke],
        }
    }

    /// Gás medido quando a configuração não especifica um
    pub fn default_gas(&self) -> GasKind {
        self.supported_gases()[0]
    }

    pub fn supports(&self, gas: GasKind) -> bool {
        self.supported_gases().contains(&gas)
    }
}

impl fmt::Display for SensorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SensorModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_uppercase();

        let model = match normalized.as_str() {
            "MQ2" => SensorModel::Mq2,
            "MQ3" => SensorModel::Mq3,
            "MQ4" => SensorModel::Mq4,
            "MQ5" => SensorModel::Mq5,
            "MQ6" => SensorModel::Mq6,
            "MQ7" => SensorModel::Mq7,
            "MQ8" => SensorModel::Mq8,
            "MQ9" => SensorModel::Mq9,
            "MQ135" => SensorModel::Mq135,
            _ => return Err(format!("unknown sensor model '{}'", s.trim())),
        };
        Ok(model)
    }
}

impl TryFrom<String> for SensorModel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SensorModel> for String {
    fn from(model: SensorModel) -> Self {
        model.code().to_string()
    }
}

/// Fase de operação do monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MonitorState {
    /// Aquecedor desligado, sem leituras
    #[default]
    Stopped,
    /// Aquecedor ligado, aguardando o fim do aquecimento
    Warming,
    /// Amostragem periódica ativa
    Sampling,
}

impl MonitorState {
    /// `Warming` ou `Sampling`
    pub fn is_running(&self) -> bool {
        !matches!(self, MonitorState::Stopped)
    }
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MonitorState::Stopped => "stopped",
            MonitorState::Warming => "warming",
            MonitorState::Sampling => "sampling",
        };
        f.write_str(name)
    }
}

/// Converte PPM para porcentagem em volume (1% = 10 000 ppm)
pub fn ppm_to_percent(ppm: f32) -> f32 {
    ppm * 0.0001
}
