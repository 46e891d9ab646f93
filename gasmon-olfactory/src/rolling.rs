//! Buffer circular de tamanho fixo com média móvel

/// Buffer circular das N leituras mais recentes
///
/// O tamanho é definido na construção e nunca muda; todos os slots sempre
/// contêm um valor válido.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingAverage {
    slots: Vec<f32>,
    /// Próximo slot a ser sobrescrito (o mais antigo)
    head: usize,
}

impl RollingAverage {
    /// Cria buffer com `len` slots preenchidos com `fill`.
    ///
    /// `len == 0` é tratado como 1.
    pub fn new(len: usize, fill: f32) -> Self {
        Self {
            slots: vec![fill; len.max(1)],
            head: 0,
        }
    }

    /// Preenche todos os slots com `value`
    pub fn fill(&mut self, value: f32) {
        self.slots.iter_mut().for_each(|slot| *slot = value);
        self.head = 0;
    }

    /// Sobrescreve o slot mais antigo
    pub fn push(&mut self, value: f32) {
        self.slots[self.head] = value;
        self.head = (self.head + 1) % self.slots.len();
    }

    /// Média aritmética de todos os slots
    pub fn mean(&self) -> f32 {
        let sum: f64 = self.slots.iter().map(|&v| v as f64).sum();
        (sum / self.slots.len() as f64) as f32
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Sempre `false`: o buffer tem ao menos um slot
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Valor escrito mais recentemente
    pub fn latest(&self) -> f32 {
        let idx = (self.head + self.slots.len() - 1) % self.slots.len();
        self.slots[idx]
    }

    /// Itera do mais antigo para o mais recente
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer.iter()).copied()
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_filled() {
        let buf = RollingAverage::new(4, 1.5);
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.to_vec(), vec![1.5; 4]);
        assert_eq!(buf.mean(), 1.5);
    }

    #[test]
    fn test_zero_length_becomes_one() {
        let buf = RollingAverage::new(0, 2.0);
        assert_eq!(buf.len(), 1);
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_push_overwrites_oldest() {
        let mut buf = RollingAverage::new(3, 0.0);
        for v in [1.0, 2.0, 3.0, 4.0] {
            buf.push(v);
        }
        assert_eq!(buf.to_vec(), vec![2.0, 3.0, 4.0]);
        assert_eq!(buf.latest(), 4.0);
        assert_eq!(buf.mean(), 3.0);
    }

    #[test]
    fn test_fill_resets_rotation() {
        let mut buf = RollingAverage::new(3, 0.0);
        buf.push(9.0);
        buf.fill(5.0);
        assert_eq!(buf.to_vec(), vec![5.0; 3]);

        buf.push(8.0);
        assert_eq!(buf.to_vec(), vec![5.0, 5.0, 8.0]);
    }
}
