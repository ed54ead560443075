//! Python 绑定模块
//!
//! 提供 PyO3 接口，将游戏状态和计分暴露给 Python

// 允许 PyO3 宏生成的 non-local impl 定义
#![allow(non_local_definitions)]

#[cfg(feature = "python")]
pub mod game_state;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// 依次执行一组放置（如 `["30_D_D", "31__DD"]`）并计算得分
#[cfg(feature = "python")]
#[pyfunction]
fn score_placements(py: Python, placements: Vec<String>) -> PyResult<PyObject> {
    use crate::board::Board;
    use crate::game::Move;

    let mut board = Board::new();
    for s in &placements {
        let m: Move = s
            .parse()
            .map_err(|e: crate::error::ParseError| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;
        board = board
            .set(m.position, m.tile)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;
    }
    game_state::score_to_dict(py, &crate::scoring::calculate_score(&board))
}

/// Python 模块初始化
#[cfg(feature = "python")]
#[pymodule]
fn route_engine(_py: Python, m: &PyModule) -> PyResult<()> {
    use game_state::PyGameState;

    m.add_class::<PyGameState>()?;
    m.add_function(pyo3::wrap_pyfunction!(score_placements, m)?)?;
    Ok(())
}
