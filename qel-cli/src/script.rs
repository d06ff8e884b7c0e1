//! Ações agendadas da linha de comando: `FLOOR@TICK`

use std::str::FromStr;
use qel_dispatch::LocationId;

/// Ação em um andar após `tick` ticks (0 = antes do primeiro)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub floor: LocationId,
    pub tick: u64,
}

impl FromStr for Scheduled {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (floor, tick) = match s.split_once('@') {
            Some((floor, tick)) => (floor, tick),
            None => (s, "0"),
        };

        let floor = floor
            .trim()
            .parse()
            .map_err(|_| format!("invalid floor in '{}', expected FLOOR@TICK", s))?;
        let tick = tick
            .trim()
            .parse()
            .map_err(|_| format!("invalid tick in '{}', expected FLOOR@TICK", s))?;

        Ok(Self { floor, tick })
    }
}

/// Andares agendados para o tick
pub fn due(actions: &[Scheduled], tick: u64) -> impl Iterator<Item = LocationId> + '_ {
    actions.iter().filter(move |a| a.tick == tick).map(|a| a.floor)
}
