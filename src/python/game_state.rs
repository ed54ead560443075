use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::game::{GamePhase, GameState, Move};
use crate::scoring::Score;
use crate::tile::Dice;

/// Python 绑定的游戏状态
///
/// Python 侧对象是可变的：每次成功的操作替换内部的持久值，失败时保持不变
#[allow(non_local_definitions)] // PyO3 宏生成的 impl 定义
#[pyclass]
pub struct PyGameState {
    pub(crate) inner: GameState,
    dice: Dice,
}

fn to_py_err(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string())
}

/// 把得分转换为 Python 字典
pub(crate) fn score_to_dict(py: Python, score: &Score) -> PyResult<PyObject> {
    let dict = PyDict::new(py);
    dict.set_item("exits", score.exits)?;
    dict.set_item("road", score.road)?;
    dict.set_item("rail", score.rail)?;
    dict.set_item("center", score.center)?;
    dict.set_item("errors", score.errors)?;
    dict.set_item("total", score.total)?;
    Ok(dict.into())
}

#[pymethods]
impl PyGameState {
    /// 创建新游戏；给定种子时骰子结果可复现
    #[new]
    #[pyo3(signature = (seed=None))]
    pub fn new(seed: Option<u64>) -> Self {
        let mut dice = match seed {
            Some(seed) => Dice::seeded(seed),
            None => Dice::new(),
        };
        let inner = GameState::with_dice(&mut dice);
        Self { inner, dice }
    }

    /// 当前回合
    #[getter]
    fn round(&self) -> u8 {
        self.inner.round()
    }

    /// 本回合的地块（字符串形式）
    #[getter]
    fn round_tiles(&self) -> Vec<String> {
        self.inner.round_tiles().iter().map(|t| t.to_string()).collect()
    }

    /// 当前阶段：`"in_round"` / `"round_ended"` / `"game_ended"`
    #[getter]
    fn phase(&self) -> &'static str {
        match self.inner.phase() {
            GamePhase::InRound(_) => "in_round",
            GamePhase::RoundEnded(_) => "round_ended",
            GamePhase::GameEnded => "game_ended",
        }
    }

    fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    /// 执行一步放置，如 `"30_D_D"`
    fn place_tile(&mut self, placement: &str) -> PyResult<()> {
        let m: Move = placement.parse().map_err(to_py_err)?;
        self.inner = self.inner.make_move(m).map_err(to_py_err)?;
        Ok(())
    }

    fn can_end_round(&self) -> bool {
        self.inner.can_end_round()
    }

    /// 结束本回合并掷出下一回合的地块
    fn end_round(&mut self) -> PyResult<()> {
        self.inner = self.inner.end_round(&mut self.dice).map_err(to_py_err)?;
        Ok(())
    }

    /// 所有值得尝试的放置（字符串形式）
    fn possible_moves(&self) -> Vec<String> {
        self.inner
            .possible_moves()
            .iter()
            .map(|c| c.placement.to_string())
            .collect()
    }

    /// 当前得分（字典）
    fn score(&self, py: Python) -> PyResult<PyObject> {
        score_to_dict(py, &self.inner.score())
    }

    /// 棋盘（`"3,0_D_D ..."` 形式）
    fn board(&self) -> String {
        self.inner.board().to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "GameState(round={}, phase={}, board={})",
            self.inner.round(),
            self.phase(),
            self.inner.board()
        )
    }
}
